//! Recovery strategies

use super::result::ReturnedError;
use serde::Serialize;

/// One recovery decision
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorHandlingStrategy {
    /// Re-execute after a delay; the caller schedules it
    Retry { retry_after_ms: u64 },
    /// Reroute to another pipeline; the caller performs the reroute
    SwitchPipeline { target_pipeline_id: String },
    /// Retire a pipeline that keeps failing
    ///
    /// `fallback` is the original error, surfaced if the pipeline cannot be
    /// destroyed.
    DestroyPipeline {
        pipeline_id: String,
        reason: String,
        http_status: u16,
        fallback: ReturnedError,
    },
    /// Surface the error to the caller
    ReturnError {
        http_status: u16,
        details: ReturnedError,
    },
}

impl ErrorHandlingStrategy {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            ErrorHandlingStrategy::Retry { .. } => "retry",
            ErrorHandlingStrategy::SwitchPipeline { .. } => "switch_pipeline",
            ErrorHandlingStrategy::DestroyPipeline { .. } => "destroy_pipeline",
            ErrorHandlingStrategy::ReturnError { .. } => "return_error",
        }
    }
}
