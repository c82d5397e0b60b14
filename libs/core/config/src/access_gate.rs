use crate::{env_flag, env_or_default, ConfigError, FromEnv};

/// Shared secret expected when nothing else is configured
pub const DEFAULT_API_PASSWORD: &str = "user-management-secret";

/// Header carrying the shared secret
pub const API_PASSWORD_HEADER: &str = "x-api-password";

/// Settings for the shared-secret request gate.
///
/// This is a placeholder access check, not an authentication system: one
/// static secret, compared verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessGateConfig {
    pub enabled: bool,
    pub secret: String,
}

impl AccessGateConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            enabled: true,
            secret: secret.into(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            secret: String::new(),
        }
    }
}

impl FromEnv for AccessGateConfig {
    /// Reads:
    /// - ACCESS_GATE_ENABLED: defaults to true
    /// - API_PASSWORD: defaults to [`DEFAULT_API_PASSWORD`]
    fn from_env() -> Result<Self, ConfigError> {
        let enabled = env_flag("ACCESS_GATE_ENABLED", true)?;
        let secret = env_or_default("API_PASSWORD", DEFAULT_API_PASSWORD);

        if enabled && secret.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "API_PASSWORD".to_string(),
                details: "must not be blank while the access gate is enabled".to_string(),
            });
        }

        Ok(Self { enabled, secret })
    }
}

impl Default for AccessGateConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_PASSWORD)
    }
}
