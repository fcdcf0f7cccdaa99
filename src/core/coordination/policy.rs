//! Recovery policy
//!
//! Maps a classification and the attempt state to exactly one strategy:
//!
//! 1. fatal: return the error, never retried
//! 2. attempts exhausted: switch to a healthy alternate, else destroy the
//!    pipeline, else return the error flagged `max_retries_exceeded`
//! 3. retryable: retry after the configured backoff
//! 4. switchable with a healthy alternate: switch early
//! 5. otherwise return the error
//!
//! The policy only queries its collaborators; it never mutates them.

use super::error::PipelineError;
use super::executor::{calculate_backoff_delay, http_status_for};
use super::result::ReturnedError;
use super::strategy::ErrorHandlingStrategy;
use super::types::{ErrorClassification, ErrorContext};
use crate::config::CoordinatorConfig;
use crate::core::pipeline::{LoadBalancer, PipelineId, PipelineManager};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::debug;

/// HTTP status used when a pipeline is destroyed
pub const DESTROY_HTTP_STATUS: u16 = 503;

/// Recovery policy engine
#[derive(Clone)]
pub struct RecoveryPolicy {
    config: Arc<CoordinatorConfig>,
    load_balancer: Option<Arc<dyn LoadBalancer>>,
    pipeline_manager: Option<Arc<dyn PipelineManager>>,
}

impl RecoveryPolicy {
    pub fn new(
        config: Arc<CoordinatorConfig>,
        load_balancer: Option<Arc<dyn LoadBalancer>>,
        pipeline_manager: Option<Arc<dyn PipelineManager>>,
    ) -> Self {
        Self {
            config,
            load_balancer,
            pipeline_manager,
        }
    }

    /// Decide how to recover from one failure
    ///
    /// Errors only come from the collaborators' queries.
    pub async fn decide(
        &self,
        error: &PipelineError,
        classification: &ErrorClassification,
        context: &ErrorContext,
    ) -> Result<ErrorHandlingStrategy> {
        let status = http_status_for(classification.error_type);

        if classification.is_fatal {
            debug!(request_id = %context.request_id, "Fatal error, returning");
            let details =
                ReturnedError::from_classification(error, classification, context, status).fatal();
            return Ok(ErrorHandlingStrategy::ReturnError {
                http_status: status,
                details,
            });
        }

        if context.is_last_attempt(self.config.max_attempts) {
            return self.decide_exhausted(error, classification, context).await;
        }

        if self.config.enable_retry && classification.is_retryable {
            let attempt = context.attempt_number.saturating_add(1);
            let retry_after_ms = calculate_backoff_delay(&self.config, attempt);
            debug!(
                request_id = %context.request_id,
                "Retry attempt {} after {}ms", attempt, retry_after_ms
            );
            return Ok(ErrorHandlingStrategy::Retry { retry_after_ms });
        }

        if self.config.enable_pipeline_switch && classification.requires_pipeline_switch {
            if let Some(target_pipeline_id) = self.find_alternate(context).await? {
                return Ok(ErrorHandlingStrategy::SwitchPipeline { target_pipeline_id });
            }
        }

        Ok(ErrorHandlingStrategy::ReturnError {
            http_status: status,
            details: ReturnedError::from_classification(error, classification, context, status),
        })
    }

    async fn decide_exhausted(
        &self,
        error: &PipelineError,
        classification: &ErrorClassification,
        context: &ErrorContext,
    ) -> Result<ErrorHandlingStrategy> {
        debug!(
            request_id = %context.request_id,
            "Attempts exhausted ({}/{})",
            context.attempt_number,
            context.effective_max_attempts(self.config.max_attempts)
        );

        if self.config.enable_pipeline_switch && classification.requires_pipeline_switch {
            if let Some(target_pipeline_id) = self.find_alternate(context).await? {
                return Ok(ErrorHandlingStrategy::SwitchPipeline { target_pipeline_id });
            }
        }

        let status = http_status_for(classification.error_type);
        let details = ReturnedError::from_classification(error, classification, context, status)
            .retries_exhausted();

        if self.config.enable_pipeline_destroy && classification.requires_pipeline_destruction {
            if let Some(pipeline_id) = &context.pipeline_id {
                return Ok(ErrorHandlingStrategy::DestroyPipeline {
                    pipeline_id: pipeline_id.clone(),
                    reason: format!(
                        "Pipeline {} failed {} consecutive attempts with {} errors",
                        pipeline_id, context.attempt_number, classification.error_type
                    ),
                    http_status: DESTROY_HTTP_STATUS,
                    fallback: details,
                });
            }
        }

        Ok(ErrorHandlingStrategy::ReturnError {
            http_status: status,
            details,
        })
    }

    /// Healthy pipeline other than the current one, chosen by the load balancer
    async fn find_alternate(&self, context: &ErrorContext) -> Result<Option<PipelineId>> {
        if !self.config.enable_load_balancer {
            return Ok(None);
        }
        let (Some(load_balancer), Some(pipeline_manager)) =
            (&self.load_balancer, &self.pipeline_manager)
        else {
            return Ok(None);
        };

        let mut all: Vec<PipelineId> = pipeline_manager
            .get_all_pipelines()
            .await?
            .into_keys()
            .collect();
        all.sort();

        let candidates: Vec<PipelineId> = load_balancer
            .get_healthy_pipelines(&all)
            .await?
            .into_iter()
            .filter(|id| Some(id) != context.pipeline_id.as_ref())
            .collect();

        if candidates.is_empty() {
            debug!(request_id = %context.request_id, "No healthy alternate pipeline");
            return Ok(None);
        }

        let chosen = load_balancer.select_pipeline(&candidates).await?;
        Ok(Some(chosen))
    }
}
