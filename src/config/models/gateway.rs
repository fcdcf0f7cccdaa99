//! Top-level gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Gateway configuration as found in the YAML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Admin server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Error coordination configuration
    #[serde(default)]
    pub coordinator: CoordinatorConfig,
}

impl GatewayConfig {
    /// Build configuration from environment variables
    pub fn from_env() -> crate::utils::error::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
            coordinator: CoordinatorConfig::from_env()?,
        })
    }
}
