//! Data model for error coordination
//!
//! Defines the error taxonomy, the per-attempt execution context, and the
//! classification verdict produced for every failure.

use super::error::PipelineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Error taxonomy
///
/// Every failure surfacing from a pipeline execution resolves to exactly one
/// of these types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// Network, socket and connection failures
    Connection,
    /// Upstream or request timeouts
    Timeout,
    /// Rate limits and quota exhaustion
    RateLimit,
    /// Authentication and permission failures
    Auth,
    /// Malformed or invalid requests and configuration
    Validation,
    /// Pipeline construction and module failures
    Pipeline,
    /// Protocol translation failures
    Transform,
    /// Anything not matched by a rule
    Unknown,
}

impl ErrorType {
    /// Number of variants
    pub const COUNT: usize = 8;

    /// All variants in declaration order
    pub const ALL: [ErrorType; Self::COUNT] = [
        ErrorType::Connection,
        ErrorType::Timeout,
        ErrorType::RateLimit,
        ErrorType::Auth,
        ErrorType::Validation,
        ErrorType::Pipeline,
        ErrorType::Transform,
        ErrorType::Unknown,
    ];

    /// Position of this variant in [`ErrorType::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorType::Connection => "CONNECTION",
            ErrorType::Timeout => "TIMEOUT",
            ErrorType::RateLimit => "RATE_LIMIT",
            ErrorType::Auth => "AUTH",
            ErrorType::Validation => "VALIDATION",
            ErrorType::Pipeline => "PIPELINE",
            ErrorType::Transform => "TRANSFORM",
            ErrorType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the context fields worth keeping alongside a chained error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnapshot {
    pub pipeline_id: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub attempt_number: u32,
    pub status_code: Option<u16>,
}

/// One entry of an [`ErrorContext`]'s error chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorChainEntry {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub snapshot: ContextSnapshot,
}

/// Per-attempt execution context
///
/// Fields are fixed for one attempt. The error chain is append-only and is
/// carried across retries of the same logical request for diagnostics; policy
/// logic never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    pub request_id: String,
    pub pipeline_id: Option<String>,
    pub layer_name: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    /// Last observed upstream HTTP status
    pub status_code: Option<u16>,
    /// Number of prior attempts for this request (0-based)
    #[serde(default)]
    pub attempt_number: u32,
    /// Attempt budget for this request; unset defers to the coordinator's `max_attempts`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    error_chain: Vec<ErrorChainEntry>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ErrorContext {
    /// Create a context for the first attempt of a request
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            pipeline_id: None,
            layer_name: None,
            provider: None,
            model: None,
            endpoint: None,
            status_code: None,
            attempt_number: 0,
            max_attempts: None,
            error_chain: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Create a context with a freshly generated request id
    pub fn with_generated_id() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_pipeline(mut self, pipeline_id: impl Into<String>) -> Self {
        self.pipeline_id = Some(pipeline_id.into());
        self
    }

    /// Override the configured attempt budget for this request
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_layer(mut self, layer_name: impl Into<String>) -> Self {
        self.layer_name = Some(layer_name.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_attempt(mut self, attempt_number: u32) -> Self {
        self.attempt_number = attempt_number;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Attempt budget, falling back to `default_max_attempts` when unset
    pub fn effective_max_attempts(&self, default_max_attempts: u32) -> u32 {
        self.max_attempts.unwrap_or(default_max_attempts)
    }

    /// Whether the attempt budget is exhausted
    pub fn is_last_attempt(&self, default_max_attempts: u32) -> bool {
        self.attempt_number >= self.effective_max_attempts(default_max_attempts)
    }

    /// Snapshot of the fields recorded with chained errors
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            pipeline_id: self.pipeline_id.clone(),
            provider: self.provider.clone(),
            model: self.model.clone(),
            attempt_number: self.attempt_number,
            status_code: self.status_code,
        }
    }

    /// Append an error to the chain
    pub fn record_error(&mut self, error: &PipelineError) {
        let snapshot = self.snapshot();
        self.error_chain.push(ErrorChainEntry {
            message: error.message.clone(),
            timestamp: Utc::now(),
            snapshot,
        });
    }

    pub fn error_chain(&self) -> &[ErrorChainEntry] {
        &self.error_chain
    }

    /// Context for the next attempt of the same logical request
    ///
    /// The attempt counter is incremented and the error chain carried over.
    pub fn next_attempt(&self) -> Self {
        let mut next = self.clone();
        next.attempt_number = self.attempt_number.saturating_add(1);
        next
    }
}

/// Classification verdict for one error occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorClassification {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    /// 0.0 to 1.0
    pub confidence: f64,
    /// Identifier of the rule that produced this classification
    pub matched_pattern: String,
    pub context_hints: Vec<String>,
    pub is_retryable: bool,
    pub is_fatal: bool,
    pub requires_pipeline_switch: bool,
    pub requires_pipeline_destruction: bool,
}
