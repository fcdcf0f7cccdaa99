//! Coordination facade
//!
//! [`ErrorCoordinator::handle_error`] is the single entry point used by the
//! rest of the gateway: classify, log, decide, execute, log the result.
//! It never fails; a defect anywhere after classification (including a
//! panicking collaborator) degrades to a returned error with
//! `success: false`.

use super::classifier::ErrorClassifier;
use super::error::PipelineError;
use super::executor::StrategyExecutor;
use super::policy::RecoveryPolicy;
use super::result::{
    ErrorHandlingResult, ErrorResponse, ErrorResponseDetail, HandlingFailure, ReturnedError,
};
use super::stats::{ErrorStats, StatsRegister};
use super::types::{ErrorClassification, ErrorContext};
use crate::config::CoordinatorConfig;
use crate::core::pipeline::{LoadBalancer, PipelineManager};
use crate::utils::error::Result;
use crate::utils::logging::{ErrorLogger, TracingErrorLogger};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Status used when nothing more specific is known
const DEFAULT_HTTP_STATUS: u16 = 500;

/// Error Coordination Center
///
/// One instance per gateway process, shared as `Arc<ErrorCoordinator>` by all
/// in-flight requests.
pub struct ErrorCoordinator {
    config: Arc<CoordinatorConfig>,
    stats: Arc<StatsRegister>,
    classifier: ErrorClassifier,
    policy: RecoveryPolicy,
    executor: StrategyExecutor,
    logger: Arc<dyn ErrorLogger>,
}

/// Builder wiring the optional collaborators into a coordinator
pub struct ErrorCoordinatorBuilder {
    config: CoordinatorConfig,
    load_balancer: Option<Arc<dyn LoadBalancer>>,
    pipeline_manager: Option<Arc<dyn PipelineManager>>,
    logger: Option<Arc<dyn ErrorLogger>>,
    stats: Option<Arc<StatsRegister>>,
}

impl ErrorCoordinatorBuilder {
    pub fn with_load_balancer(mut self, load_balancer: Arc<dyn LoadBalancer>) -> Self {
        self.load_balancer = Some(load_balancer);
        self
    }

    pub fn with_pipeline_manager(mut self, pipeline_manager: Arc<dyn PipelineManager>) -> Self {
        self.pipeline_manager = Some(pipeline_manager);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ErrorLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Share an existing statistics register
    pub fn with_stats(mut self, stats: Arc<StatsRegister>) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn build(self) -> ErrorCoordinator {
        let config = Arc::new(self.config);
        let stats = self.stats.unwrap_or_default();

        info!(
            "Creating error coordinator (load balancer: {}, pipeline manager: {})",
            self.load_balancer.is_some(),
            self.pipeline_manager.is_some()
        );

        ErrorCoordinator {
            classifier: ErrorClassifier::new(config.enable_classification, stats.clone()),
            policy: RecoveryPolicy::new(
                config.clone(),
                self.load_balancer,
                self.pipeline_manager.clone(),
            ),
            executor: StrategyExecutor::new(self.pipeline_manager),
            logger: self
                .logger
                .unwrap_or_else(|| Arc::new(TracingErrorLogger) as Arc<dyn ErrorLogger>),
            config,
            stats,
        }
    }
}

impl ErrorCoordinator {
    /// Coordinator without collaborators: retries and returns only
    pub fn new(config: CoordinatorConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: CoordinatorConfig) -> ErrorCoordinatorBuilder {
        ErrorCoordinatorBuilder {
            config,
            load_balancer: None,
            pipeline_manager: None,
            logger: None,
            stats: None,
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Context for the first attempt of a request, budgeted from config
    pub fn context(&self, request_id: impl Into<String>) -> ErrorContext {
        ErrorContext::new(request_id).with_max_attempts(self.config.max_attempts)
    }

    /// Handle one pipeline failure
    ///
    /// A context without its own attempt budget gets the configured
    /// `max_attempts`.
    pub async fn handle_error(
        &self,
        error: &PipelineError,
        mut context: ErrorContext,
    ) -> ErrorHandlingResult {
        context.max_attempts.get_or_insert(self.config.max_attempts);
        let classification = self.classifier.classify(error, &context);

        let outcome = AssertUnwindSafe(self.coordinate(error, &classification, &context))
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => self.handling_failed(error, &classification, context, e.to_string()),
            Err(panic) => self.handling_failed(
                error,
                &classification,
                context,
                panic_message(panic.as_ref()),
            ),
        };

        self.stats.record_action(result.action_taken);
        result
    }

    /// Classify without deciding anything (still counted)
    pub fn classify(&self, error: &PipelineError, context: &ErrorContext) -> ErrorClassification {
        self.classifier.classify(error, context)
    }

    async fn coordinate(
        &self,
        error: &PipelineError,
        classification: &ErrorClassification,
        context: &ErrorContext,
    ) -> Result<ErrorHandlingResult> {
        self.notify(|logger| logger.log_error(error, context, classification));

        let strategy = self.policy.decide(error, classification, context).await?;
        debug!(
            request_id = %context.request_id,
            strategy = strategy.name(),
            "Recovery strategy decided"
        );

        let result = self.executor.execute(strategy, context).await;

        self.notify(|logger| logger.log_handling_result(&result, context));
        Ok(result)
    }

    fn notify<F>(&self, f: F)
    where
        F: FnOnce(&dyn ErrorLogger),
    {
        let logger = self.logger.as_ref();
        if std::panic::catch_unwind(AssertUnwindSafe(|| f(logger))).is_err() {
            debug!("Error logger panicked; ignoring");
        }
    }

    fn handling_failed(
        &self,
        error: &PipelineError,
        classification: &ErrorClassification,
        context: ErrorContext,
        handling_message: String,
    ) -> ErrorHandlingResult {
        error!(
            request_id = %context.request_id,
            "Error handling failed: {} (original error: {})", handling_message, error.message
        );

        let details = ReturnedError {
            message: error.message.clone(),
            http_status_code: DEFAULT_HTTP_STATUS,
            error_type: Some(classification.error_type),
            fatal: false,
            max_retries_exceeded: false,
            pipeline_id: context.pipeline_id.clone(),
            underlying_error: Some(handling_message.clone()),
            hints: Vec::new(),
        };
        let failure = HandlingFailure {
            original_message: error.message.clone(),
            handling_message,
        };
        ErrorHandlingResult::failed(details, Some(failure), context)
    }

    /// Render a caller-facing error body
    ///
    /// The status is the explicit one if given, else the error's upstream
    /// status, else the context's last observed status, else 500.
    pub fn format_error_response(
        error: &PipelineError,
        context: &ErrorContext,
        http_status_code: Option<u16>,
    ) -> ErrorResponse {
        let http_status_code = http_status_code
            .or(error.status_code)
            .or(context.status_code)
            .unwrap_or(DEFAULT_HTTP_STATUS);

        ErrorResponse {
            error: ErrorResponseDetail {
                message: error.message.clone(),
                request_id: context.request_id.clone(),
                timestamp: chrono::Utc::now(),
                http_status_code,
                pipeline_id: context.pipeline_id.clone(),
                provider: context.provider.clone(),
                model: context.model.clone(),
                code: error.code.map(|c| c.as_str().to_string()),
                module: error.module.clone(),
                context: error.context.clone(),
            },
        }
    }

    /// Counters plus the active configuration
    pub fn get_error_stats(&self) -> ErrorStats {
        self.stats.snapshot(&self.config)
    }

    pub fn reset_stats(&self) {
        info!("Resetting error statistics");
        self.stats.reset();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panic during error handling: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panic during error handling: {}", message)
    } else {
        "panic during error handling".to_string()
    }
}
