//! Outcome records returned by the coordinator

use super::error::PipelineError;
use super::types::{ErrorClassification, ErrorContext, ErrorType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action the coordinator settled on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTaken {
    Retry,
    Switched,
    Destroyed,
    Returned,
    Ignored,
}

impl ActionTaken {
    pub const COUNT: usize = 5;

    pub const ALL: [ActionTaken; Self::COUNT] = [
        ActionTaken::Retry,
        ActionTaken::Switched,
        ActionTaken::Destroyed,
        ActionTaken::Returned,
        ActionTaken::Ignored,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ActionTaken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionTaken::Retry => "retry",
            ActionTaken::Switched => "switched",
            ActionTaken::Destroyed => "destroyed",
            ActionTaken::Returned => "returned",
            ActionTaken::Ignored => "ignored",
        };
        f.write_str(name)
    }
}

/// Structured error payload surfaced to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnedError {
    pub message: String,
    pub http_status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    #[serde(default)]
    pub fatal: bool,
    #[serde(default)]
    pub max_retries_exceeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

impl ReturnedError {
    /// Payload for an error the policy decided to surface
    pub fn from_classification(
        error: &PipelineError,
        classification: &ErrorClassification,
        context: &ErrorContext,
        http_status_code: u16,
    ) -> Self {
        Self {
            message: error.message.clone(),
            http_status_code,
            error_type: Some(classification.error_type),
            fatal: false,
            max_retries_exceeded: false,
            pipeline_id: context.pipeline_id.clone(),
            underlying_error: None,
            hints: classification.context_hints.clone(),
        }
    }

    pub fn fatal(mut self) -> Self {
        self.fatal = true;
        self
    }

    pub fn retries_exhausted(mut self) -> Self {
        self.max_retries_exceeded = true;
        self
    }
}

/// Failure of the coordination process itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlingFailure {
    /// Message of the pipeline error being handled
    pub original_message: String,
    /// What went wrong while handling it
    pub handling_message: String,
}

/// Result of handling one pipeline failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHandlingResult {
    /// Whether coordination completed without an internal failure
    pub success: bool,
    pub action_taken: ActionTaken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switched_to_pipeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destroyed_pipeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned_error: Option<ReturnedError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<HandlingFailure>,
    pub context: ErrorContext,
}

impl ErrorHandlingResult {
    fn base(action_taken: ActionTaken, context: ErrorContext) -> Self {
        Self {
            success: true,
            action_taken,
            retry_after_ms: None,
            switched_to_pipeline: None,
            destroyed_pipeline: None,
            returned_error: None,
            error: None,
            context,
        }
    }

    pub fn retry(retry_after_ms: u64, context: ErrorContext) -> Self {
        Self {
            retry_after_ms: Some(retry_after_ms),
            ..Self::base(ActionTaken::Retry, context)
        }
    }

    pub fn switched(pipeline_id: String, context: ErrorContext) -> Self {
        Self {
            switched_to_pipeline: Some(pipeline_id),
            ..Self::base(ActionTaken::Switched, context)
        }
    }

    pub fn destroyed(pipeline_id: String, context: ErrorContext) -> Self {
        Self {
            destroyed_pipeline: Some(pipeline_id),
            ..Self::base(ActionTaken::Destroyed, context)
        }
    }

    pub fn returned(details: ReturnedError, context: ErrorContext) -> Self {
        Self {
            returned_error: Some(details),
            ..Self::base(ActionTaken::Returned, context)
        }
    }

    /// Returned error produced after coordination itself failed
    pub fn failed(
        details: ReturnedError,
        error: Option<HandlingFailure>,
        context: ErrorContext,
    ) -> Self {
        Self {
            success: false,
            returned_error: Some(details),
            error,
            ..Self::base(ActionTaken::Returned, context)
        }
    }

    /// HTTP status a transport should answer with
    pub fn http_status(&self) -> u16 {
        match self.action_taken {
            ActionTaken::Retry => 429,
            ActionTaken::Switched | ActionTaken::Destroyed => 503,
            ActionTaken::Returned | ActionTaken::Ignored => self
                .returned_error
                .as_ref()
                .map(|e| e.http_status_code)
                .unwrap_or(500),
        }
    }
}

/// Caller-facing error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseDetail,
}

/// Caller-facing error detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseDetail {
    pub message: String,
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub http_status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}
