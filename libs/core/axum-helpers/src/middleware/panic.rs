use std::any::Any;

use axum::{
    body::Body,
    http::Response,
    response::IntoResponse,
};
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::errors::{ErrorCode, internal_problem};

/// Turns a caught handler panic into a 500 problem.
///
/// The panic message is logged at `error` and only echoed in `detail` when
/// the request context allows error details.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicToProblem;

impl ResponseForPanic for PanicToProblem {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Self::ResponseBody> {
        let message = panic_message(err.as_ref());
        tracing::error!(
            error_code = ErrorCode::UnhandledPanic.code(),
            panic = %message,
            "Handler panicked"
        );
        internal_problem(message).into_response()
    }
}

/// Layer that catches panics below it and renders them as problems.
pub fn catch_panic_layer() -> CatchPanicLayer<PanicToProblem> {
    CatchPanicLayer::custom(PanicToProblem)
}

fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "panic with non-string payload".to_string()
    }
}
