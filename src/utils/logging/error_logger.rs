//! Observability sink for handled errors

use crate::core::coordination::{
    ActionTaken, ErrorClassification, ErrorContext, ErrorHandlingResult, PipelineError,
};
use tracing::{error, info, warn};

/// Receives every handled error and its outcome
///
/// Calls are fire-and-forget: nothing a sink does can change the result the
/// coordinator returns.
pub trait ErrorLogger: Send + Sync {
    fn log_error(
        &self,
        error: &PipelineError,
        context: &ErrorContext,
        classification: &ErrorClassification,
    );

    fn log_handling_result(&self, result: &ErrorHandlingResult, context: &ErrorContext);
}

/// Default sink emitting structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorLogger;

impl ErrorLogger for TracingErrorLogger {
    fn log_error(
        &self,
        error: &PipelineError,
        context: &ErrorContext,
        classification: &ErrorClassification,
    ) {
        warn!(
            request_id = %context.request_id,
            pipeline_id = context.pipeline_id.as_deref().unwrap_or("-"),
            provider = context.provider.as_deref().unwrap_or("-"),
            model = context.model.as_deref().unwrap_or("-"),
            attempt = context.attempt_number,
            max_attempts = ?context.max_attempts,
            error_type = %classification.error_type,
            confidence = classification.confidence,
            matched_pattern = %classification.matched_pattern,
            "Pipeline error: {}", error.message
        );
    }

    fn log_handling_result(&self, result: &ErrorHandlingResult, context: &ErrorContext) {
        if !result.success {
            error!(
                request_id = %context.request_id,
                action = %result.action_taken,
                "Error handling did not complete cleanly"
            );
            return;
        }

        match result.action_taken {
            ActionTaken::Retry => info!(
                request_id = %context.request_id,
                retry_after_ms = result.retry_after_ms.unwrap_or_default(),
                "Scheduling retry"
            ),
            ActionTaken::Switched => info!(
                request_id = %context.request_id,
                target = result.switched_to_pipeline.as_deref().unwrap_or("-"),
                "Switched pipeline"
            ),
            ActionTaken::Destroyed => warn!(
                request_id = %context.request_id,
                pipeline_id = result.destroyed_pipeline.as_deref().unwrap_or("-"),
                "Destroyed pipeline"
            ),
            ActionTaken::Returned | ActionTaken::Ignored => info!(
                request_id = %context.request_id,
                status = result.http_status(),
                "Returning error to caller"
            ),
        }
    }
}
