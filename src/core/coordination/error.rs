//! Errors raised by pipeline execution
//!
//! A [`PipelineError`] is the failure handed to the coordinator. It always
//! carries a message and may carry a structured [`ErrorCode`] plus the module
//! and context it originated from.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use thiserror::Error;

/// Structured error codes raised by pipeline modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Network
    NetworkError,
    ConnectionRefused,
    ConnectionReset,
    ConnectionFailed,
    SocketError,
    DnsError,
    // Timeouts
    Timeout,
    RequestTimeout,
    UpstreamTimeout,
    // Rate limiting
    RateLimitExceeded,
    QuotaExceeded,
    TooManyRequests,
    // Authentication
    AuthFailed,
    Unauthorized,
    PermissionDenied,
    InvalidToken,
    TokenExpired,
    // Validation
    ValidationError,
    InvalidFormat,
    InvalidRequest,
    MissingRequiredField,
    ConfigError,
    // Pipeline
    PipelineError,
    PipelineNotFound,
    ModuleError,
    ModuleInitFailed,
    // Transformation
    TransformError,
    UnsupportedFormat,
    ProtocolMismatch,
    // Unmapped
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ConnectionRefused => "CONNECTION_REFUSED",
            ErrorCode::ConnectionReset => "CONNECTION_RESET",
            ErrorCode::ConnectionFailed => "CONNECTION_FAILED",
            ErrorCode::SocketError => "SOCKET_ERROR",
            ErrorCode::DnsError => "DNS_ERROR",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::RequestTimeout => "REQUEST_TIMEOUT",
            ErrorCode::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::QuotaExceeded => "QUOTA_EXCEEDED",
            ErrorCode::TooManyRequests => "TOO_MANY_REQUESTS",
            ErrorCode::AuthFailed => "AUTH_FAILED",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::PipelineError => "PIPELINE_ERROR",
            ErrorCode::PipelineNotFound => "PIPELINE_NOT_FOUND",
            ErrorCode::ModuleError => "MODULE_ERROR",
            ErrorCode::ModuleInitFailed => "MODULE_INIT_FAILED",
            ErrorCode::TransformError => "TRANSFORM_ERROR",
            ErrorCode::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorCode::ProtocolMismatch => "PROTOCOL_MISMATCH",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised by a pipeline execution
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct PipelineError {
    pub message: String,
    pub code: Option<ErrorCode>,
    /// Module that raised the error
    pub module: Option<String>,
    /// Module-specific diagnostic payload
    pub context: Option<serde_json::Value>,
    /// Upstream HTTP status, if the error came from a provider response
    pub status_code: Option<u16>,
    /// Set by callers that already know the request itself is invalid
    #[serde(default)]
    pub validation: bool,
}

impl PipelineError {
    /// Create an unstructured error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            module: None,
            context: None,
            status_code: None,
            validation: false,
        }
    }

    /// Create a structured error carrying a code
    pub fn with_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            ..Self::new(message)
        }
    }

    /// Capture any error's message as an unstructured pipeline error
    pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        Self::new(error.to_string())
    }

    pub fn in_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Flag the error as a caller-side validation failure
    pub fn as_validation(mut self) -> Self {
        self.validation = true;
        self
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(error: std::io::Error) -> Self {
        let code = match error.kind() {
            ErrorKind::ConnectionRefused => Some(ErrorCode::ConnectionRefused),
            ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => {
                Some(ErrorCode::ConnectionReset)
            }
            ErrorKind::NotConnected | ErrorKind::BrokenPipe | ErrorKind::AddrNotAvailable => {
                Some(ErrorCode::NetworkError)
            }
            ErrorKind::TimedOut => Some(ErrorCode::Timeout),
            ErrorKind::InvalidInput | ErrorKind::InvalidData => Some(ErrorCode::InvalidFormat),
            ErrorKind::PermissionDenied => Some(ErrorCode::PermissionDenied),
            _ => None,
        };

        Self {
            code,
            ..Self::new(error.to_string())
        }
    }
}
