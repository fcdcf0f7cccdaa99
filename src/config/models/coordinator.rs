//! Error coordination configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backoff strategy selector
///
/// Maps a 1-based attempt number to the delay before the next retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffStrategy {
    /// Always wait the base delay
    Fixed,
    /// `base * 2^(attempt - 1)`, capped at the max delay
    #[default]
    Exponential,
    /// `base * attempt`, capped at the max delay
    Adaptive,
}

impl fmt::Display for BackoffStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackoffStrategy::Fixed => "fixed",
            BackoffStrategy::Exponential => "exponential",
            BackoffStrategy::Adaptive => "adaptive",
        };
        f.write_str(name)
    }
}

impl FromStr for BackoffStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(BackoffStrategy::Fixed),
            "exponential" => Ok(BackoffStrategy::Exponential),
            "adaptive" => Ok(BackoffStrategy::Adaptive),
            other => Err(format!("Unknown backoff strategy: {}", other)),
        }
    }
}

/// Error coordination configuration
///
/// Set once at construction and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Allow retry decisions
    #[serde(default = "default_true")]
    pub enable_retry: bool,
    /// Attempts allowed before a request counts as exhausted
    #[serde(default = "default_max_retries")]
    pub max_attempts: u32,
    /// Backoff strategy for retry delays
    #[serde(default)]
    pub backoff_strategy: BackoffStrategy,
    /// Base retry delay (milliseconds)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Maximum retry delay (milliseconds)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Allow failing over to another pipeline
    #[serde(default = "default_true")]
    pub enable_pipeline_switch: bool,
    /// Allow retiring persistently broken pipelines
    #[serde(default = "default_true")]
    pub enable_pipeline_destroy: bool,
    /// Classify errors (otherwise everything is UNKNOWN)
    #[serde(default = "default_true")]
    pub enable_classification: bool,
    /// Consult the load balancer for pipeline health and selection
    #[serde(default = "default_true")]
    pub enable_load_balancer: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            enable_retry: true,
            max_attempts: default_max_retries(),
            backoff_strategy: BackoffStrategy::default(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            enable_pipeline_switch: true,
            enable_pipeline_destroy: true,
            enable_classification: true,
            enable_load_balancer: true,
        }
    }
}

impl CoordinatorConfig {
    /// Apply `GATEWAY_*` environment overrides on top of the defaults
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Some(v) = env_var("GATEWAY_RETRY_ENABLED")? {
            config.enable_retry = v;
        }
        if let Some(v) = env_var("GATEWAY_MAX_ATTEMPTS")? {
            config.max_attempts = v;
        }
        if let Some(v) = env_var("GATEWAY_BACKOFF_STRATEGY")? {
            config.backoff_strategy = v;
        }
        if let Some(v) = env_var("GATEWAY_BASE_DELAY_MS")? {
            config.base_delay_ms = v;
        }
        if let Some(v) = env_var("GATEWAY_MAX_DELAY_MS")? {
            config.max_delay_ms = v;
        }
        if let Some(v) = env_var("GATEWAY_PIPELINE_SWITCH")? {
            config.enable_pipeline_switch = v;
        }
        if let Some(v) = env_var("GATEWAY_PIPELINE_DESTROY")? {
            config.enable_pipeline_destroy = v;
        }
        if let Some(v) = env_var("GATEWAY_CLASSIFICATION")? {
            config.enable_classification = v;
        }
        if let Some(v) = env_var("GATEWAY_LOAD_BALANCER")? {
            config.enable_load_balancer = v;
        }

        Ok(config)
    }
}
