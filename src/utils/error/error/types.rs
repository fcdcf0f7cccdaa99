//! Core error types for the gateway

use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
///
/// These are failures of the gateway's own machinery (configuration, the
/// pipeline collaborators, the coordinator itself). Failures raised by a
/// pipeline execution are modelled separately as
/// [`PipelineError`](crate::core::coordination::PipelineError).
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Load balancer errors
    #[error("Load balancer error: {0}")]
    LoadBalancer(String),

    /// Pipeline manager errors
    #[error("Pipeline manager error: {0}")]
    PipelineManager(String),

    /// Pipeline not found
    #[error("Pipeline not found: {0}")]
    PipelineNotFound(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
