//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod coordinator;
pub mod gateway;
pub mod logging;
pub mod server;

pub use coordinator::*;
pub use gateway::*;
pub use logging::*;
pub use server::*;

use crate::utils::error::{GatewayError, Result};
use std::str::FromStr;

/// Default server host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default maximum attempts
pub fn default_max_retries() -> u32 {
    3
}

/// Default base retry delay in milliseconds
pub fn default_base_delay_ms() -> u64 {
    1000
}

/// Default maximum retry delay in milliseconds
pub fn default_max_delay_ms() -> u64 {
    30_000
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

/// Read and parse an optional environment variable
///
/// Unset variables yield `Ok(None)`; set but unparsable values are a config error.
pub(crate) fn env_var<T: FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| GatewayError::Config(format!("Invalid value for {}: {}", key, raw))),
        Err(_) => Ok(None),
    }
}
