//! API routes

use axum::{Router, routing::get};
use axum_helpers::errors::handlers::method_not_allowed;
use core_config::AppInfo;

pub mod users;

/// Plain-text banner served at `/`
pub const BANNER: &str = "User Management API";

/// Routes nested under `/api`
pub fn routes() -> Router {
    Router::new().nest("/users", users::router())
}

/// Top-level routes outside `/api`: banner and liveness
pub fn root_routes(app: AppInfo) -> Router {
    Router::new()
        .route("/", get(|| async { BANNER }))
        .merge(axum_helpers::health_router(app))
        .method_not_allowed_fallback(method_not_allowed)
}
