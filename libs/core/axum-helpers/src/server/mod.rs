//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with the request pipeline and optional API docs
//! - The liveness endpoint
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router, RouterOptions};
//! use core_config::app_info;
//!
//! let root = Router::new().merge(health_router(app_info!()));
//! let router = create_router::<ApiDoc>(api_routes, root, &RouterOptions::default())?;
//!
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{RouterOptions, create_production_app, create_router};
pub use health::{HealthResponse, health_handler, health_router};
pub use shutdown::ShutdownCoordinator;
