//! Configuration management for the gateway
//!
//! This module handles loading and validation of the gateway configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let gateway = GatewayConfig::from_env()?;
        let config = Self { gateway };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Get coordinator configuration
    pub fn coordinator(&self) -> &CoordinatorConfig {
        &self.gateway.coordinator
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .validate()
            .map_err(|e| GatewayError::Config(format!("Invalid configuration: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_config_from_file() {
        let config_content = r#"
server:
  host: "127.0.0.1"
  port: 8080

logging:
  level: debug
  json: true

coordinator:
  max_attempts: 5
  backoff_strategy: adaptive
  base_delay_ms: 250
  max_delay_ms: 4000
  enable_pipeline_destroy: false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.server().host, "127.0.0.1");
        assert_eq!(config.server().port, 8080);
        assert!(config.logging().json);
        assert_eq!(config.coordinator().max_attempts, 5);
        assert_eq!(
            config.coordinator().backoff_strategy,
            BackoffStrategy::Adaptive
        );
        assert!(!config.coordinator().enable_pipeline_destroy);
        assert!(config.coordinator().enable_pipeline_switch);
    }

    #[tokio::test]
    async fn test_config_from_file_rejects_invalid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"coordinator:\n  base_delay_ms: 9000\n  max_delay_ms: 10\n")
            .unwrap();

        let result = Config::from_file(temp_file.path()).await;
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[tokio::test]
    async fn test_config_from_missing_file() {
        let result = Config::from_file("/nonexistent/gateway.yaml").await;
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = Config::default();
        let yaml = config.to_yaml().unwrap();
        let parsed: GatewayConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config.gateway);
    }
}
