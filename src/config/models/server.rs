//! Server configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Admin server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

impl ServerConfig {
    /// Apply `GATEWAY_HOST` / `GATEWAY_PORT` / `GATEWAY_WORKERS` overrides
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();
        if let Some(host) = env_var::<String>("GATEWAY_HOST")? {
            config.host = host;
        }
        if let Some(port) = env_var("GATEWAY_PORT")? {
            config.port = port;
        }
        config.workers = env_var("GATEWAY_WORKERS")?;
        Ok(config)
    }

    /// Get server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
