//! Strategy execution
//!
//! Turns a strategy into an [`ErrorHandlingResult`]. Pipeline destruction is
//! the only I/O performed here; everything else is formatting.

use super::result::{ErrorHandlingResult, ReturnedError};
use super::strategy::ErrorHandlingStrategy;
use super::types::{ErrorContext, ErrorType};
use crate::config::{BackoffStrategy, CoordinatorConfig};
use crate::core::pipeline::PipelineManager;
use std::sync::Arc;
use tracing::{info, warn};

/// Retry delay in milliseconds for a 1-based attempt
///
/// - fixed: `base`
/// - exponential: `min(base * 2^(attempt - 1), max)`
/// - adaptive: `min(base * attempt, max)`
pub fn calculate_backoff_delay(config: &CoordinatorConfig, attempt: u32) -> u64 {
    let attempt = attempt.max(1);
    let base = config.base_delay_ms;
    let max = config.max_delay_ms;

    match config.backoff_strategy {
        BackoffStrategy::Fixed => base,
        BackoffStrategy::Exponential => {
            let factor = 1u64.checked_shl(attempt - 1).unwrap_or(u64::MAX);
            base.saturating_mul(factor).min(max)
        }
        BackoffStrategy::Adaptive => base.saturating_mul(u64::from(attempt)).min(max),
    }
}

/// HTTP status surfaced for an error type
pub fn http_status_for(error_type: ErrorType) -> u16 {
    match error_type {
        ErrorType::Auth => 401,
        ErrorType::Validation => 400,
        ErrorType::RateLimit => 429,
        ErrorType::Timeout => 408,
        ErrorType::Connection => 503,
        ErrorType::Pipeline | ErrorType::Transform | ErrorType::Unknown => 500,
    }
}

/// Carries out recovery strategies
#[derive(Clone, Default)]
pub struct StrategyExecutor {
    pipeline_manager: Option<Arc<dyn PipelineManager>>,
}

impl StrategyExecutor {
    pub fn new(pipeline_manager: Option<Arc<dyn PipelineManager>>) -> Self {
        Self { pipeline_manager }
    }

    /// Execute a strategy
    ///
    /// Never fails: a destruction that cannot be carried out degrades to a
    /// returned error with `success: false`.
    pub async fn execute(
        &self,
        strategy: ErrorHandlingStrategy,
        context: &ErrorContext,
    ) -> ErrorHandlingResult {
        match strategy {
            ErrorHandlingStrategy::Retry { retry_after_ms } => {
                ErrorHandlingResult::retry(retry_after_ms, context.clone())
            }
            ErrorHandlingStrategy::SwitchPipeline { target_pipeline_id } => {
                info!(
                    request_id = %context.request_id,
                    "Switching to pipeline {}", target_pipeline_id
                );
                ErrorHandlingResult::switched(target_pipeline_id, context.clone())
            }
            ErrorHandlingStrategy::DestroyPipeline {
                pipeline_id,
                reason,
                fallback,
                ..
            } => self.destroy(pipeline_id, reason, fallback, context).await,
            ErrorHandlingStrategy::ReturnError { details, .. } => {
                ErrorHandlingResult::returned(details, context.clone())
            }
        }
    }

    async fn destroy(
        &self,
        pipeline_id: String,
        reason: String,
        fallback: ReturnedError,
        context: &ErrorContext,
    ) -> ErrorHandlingResult {
        let Some(manager) = &self.pipeline_manager else {
            warn!(
                "Cannot destroy pipeline {}: no pipeline manager configured",
                pipeline_id
            );
            return destruction_failed(
                pipeline_id,
                fallback,
                "no pipeline manager configured".to_string(),
                context,
            );
        };

        info!(
            request_id = %context.request_id,
            "Destroying pipeline {}: {}", pipeline_id, reason
        );

        match manager.destroy_pipeline(&pipeline_id).await {
            Ok(true) => ErrorHandlingResult::destroyed(pipeline_id, context.clone()),
            Ok(false) => {
                warn!("Pipeline manager declined to destroy {}", pipeline_id);
                destruction_failed(
                    pipeline_id,
                    fallback,
                    "pipeline manager declined destruction".to_string(),
                    context,
                )
            }
            Err(e) => {
                warn!("Failed to destroy pipeline {}: {}", pipeline_id, e);
                destruction_failed(pipeline_id, fallback, e.to_string(), context)
            }
        }
    }
}

/// The original error, annotated with why the pipeline is still around
fn destruction_failed(
    pipeline_id: String,
    fallback: ReturnedError,
    destroy_error: String,
    context: &ErrorContext,
) -> ErrorHandlingResult {
    let details = ReturnedError {
        max_retries_exceeded: true,
        pipeline_id: Some(pipeline_id.clone()),
        underlying_error: Some(format!(
            "Failed to destroy pipeline {}: {}",
            pipeline_id, destroy_error
        )),
        ..fallback
    };
    ErrorHandlingResult::failed(details, None, context.clone())
}
