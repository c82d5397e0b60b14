//! # Axum Helpers
//!
//! The shared HTTP plumbing of the service: request pipeline, problem-details
//! errors, extractors and server bootstrap.
//!
//! ## Modules
//!
//! - **[`middleware`]**: correlation id, access log, panic translation, shared-secret gate
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Problem-details error responses with error codes
//! - **[`extractors`]**: Custom extractors (integer id path, validated JSON)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router, RouterOptions};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes, Router::new(), &RouterOptions::default())?;
//!
//!     let config = ServerConfig::default();
//!     create_production_app(router, &config, std::time::Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod middleware;
pub mod server;

#[cfg(test)]
mod test_support;

// Re-export server types
pub use server::{
    HealthResponse, RouterOptions, ShutdownCoordinator, create_production_app, create_router,
    health_router,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers};

// Re-export request pipeline
pub use middleware::{AccessGate, CallerIdentity, CorrelationId, RequestContext};

// Re-export error types
pub use errors::{AppError, ErrorCode, ProblemDetails};

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson};
