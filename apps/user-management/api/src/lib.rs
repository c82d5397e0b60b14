//! User Management API
//!
//! Wires the users domain into the shared request pipeline. The binary in
//! `main.rs` only loads configuration, installs tracing and serves the
//! router built here.

pub mod api;
pub mod config;
pub mod openapi;

use axum::Router;
use axum_helpers::{AccessGate, RouterOptions, create_router};
use std::io;

use config::Config;

/// Router options derived from configuration
pub fn router_options(config: &Config) -> RouterOptions {
    RouterOptions {
        expose_error_details: config.environment.expose_error_details(),
        enable_docs: !config.environment.is_production(),
        access_gate: AccessGate::from_config(&config.access_gate),
        cors_allowed_origins: config.server.cors_allowed_origins.clone(),
    }
}

/// Build the complete application with a freshly seeded user store.
///
/// # Errors
/// Fails when a configured CORS origin is not a valid header value.
pub fn build_app(config: &Config) -> io::Result<Router> {
    create_router::<openapi::ApiDoc>(
        api::routes(),
        api::root_routes(config.app),
        &router_options(config),
    )
}
