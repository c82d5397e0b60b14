//! Configuration for the User Management API

use core_config::{AppInfo, FromEnv, access_gate::AccessGateConfig, app_info, server::ServerConfig};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub access_gate: AccessGateConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let access_gate = AccessGateConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            access_gate,
        })
    }

    /// Development settings with the default shared secret; used by tests.
    pub fn development() -> Self {
        Self {
            app: app_info!(),
            server: ServerConfig::default(),
            environment: Environment::Development,
            access_gate: AccessGateConfig::default(),
        }
    }
}
