//! Logging configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` takes precedence when set
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();
        if let Some(level) = env_var::<String>("GATEWAY_LOG_LEVEL")? {
            config.level = level;
        }
        if let Some(json) = env_var("GATEWAY_LOG_JSON")? {
            config.json = json;
        }
        Ok(config)
    }
}
