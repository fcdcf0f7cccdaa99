//! Core configuration validators
//!
//! Validation implementations for the gateway, server, logging and
//! coordinator configuration structures.

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gateway configuration");

        self.server.validate()?;
        self.logging.validate()?;
        self.coordinator.validate()?;

        debug!("Gateway configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Number of workers must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let level = self.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(format!(
                "Invalid log level '{}', expected one of {:?}",
                self.level, LOG_LEVELS
            ));
        }
        Ok(())
    }
}

impl Validate for CoordinatorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("Coordinator max attempts must be greater than 0".to_string());
        }

        if self.base_delay_ms == 0 {
            return Err("Retry base delay must be greater than 0".to_string());
        }

        if self.max_delay_ms < self.base_delay_ms {
            return Err("Retry max delay must not be less than base delay".to_string());
        }

        Ok(())
    }
}
