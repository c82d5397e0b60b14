//! Request pipeline middleware.
//!
//! Listed outermost first, the way [`create_router`](crate::server::create_router)
//! stacks them:
//! - [`request_context`]: correlation id and task-local request context
//! - [`access_log`]: one structured event per request
//! - [`catch_panic_layer`]: panics become 500 problem details
//! - [`access_gate`]: shared-secret check

pub mod access_gate;
pub mod access_log;
pub mod context;
pub mod panic;

pub use access_gate::{AccessGate, access_gate};
pub use access_log::{CallerIdentity, access_log};
pub use context::{
    CorrelationId, RequestContext, RequestContextConfig, X_CORRELATION_ID, request_context,
};
pub use panic::{PanicToProblem, catch_panic_layer};
