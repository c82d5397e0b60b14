//! User Management API - REST server

use axum_helpers::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;
use user_management_api::{build_app, config::Config};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let app = build_app(&config)?;

    info!(
        environment = ?config.environment,
        access_gate = config.access_gate.enabled,
        "Starting {} v{} on port {}",
        config.app.name,
        config.app.version,
        config.server.port
    );

    create_production_app(app, &config.server, Duration::from_secs(30), async {
        info!("Shutting down: in-memory store is dropped with the process");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("User Management API shutdown complete");
    Ok(())
}
