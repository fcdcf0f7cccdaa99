//! Error coordination tests
//!
//! Shared fakes for the pipeline collaborators and the logging sink live here.


use crate::core::coordination::{ErrorClassification, ErrorContext, ErrorHandlingResult, PipelineError};
use crate::core::pipeline::{LoadBalancer, PipelineHandle, PipelineId, PipelineManager};
use crate::utils::error::{GatewayError, Result};
use crate::utils::logging::ErrorLogger;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// How the fake manager answers destroy requests
#[derive(Debug, Clone, Copy)]
pub(super) enum DestroyBehavior {
    Succeed,
    Decline,
    Fail,
}

pub(super) struct FakePipelineManager {
    pipelines: Vec<PipelineId>,
    destroy: DestroyBehavior,
    pub destroyed: Mutex<Vec<String>>,
}

impl FakePipelineManager {
    pub fn new(pipelines: &[&str]) -> Self {
        Self {
            pipelines: pipelines.iter().map(|p| p.to_string()).collect(),
            destroy: DestroyBehavior::Succeed,
            destroyed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_destroy(mut self, destroy: DestroyBehavior) -> Self {
        self.destroy = destroy;
        self
    }
}

#[async_trait]
impl PipelineManager for FakePipelineManager {
    async fn destroy_pipeline(&self, pipeline_id: &str) -> Result<bool> {
        self.destroyed.lock().push(pipeline_id.to_string());
        match self.destroy {
            DestroyBehavior::Succeed => Ok(true),
            DestroyBehavior::Decline => Ok(false),
            DestroyBehavior::Fail => Err(GatewayError::pipeline_manager("teardown exploded")),
        }
    }

    async fn get_all_pipelines(&self) -> Result<HashMap<PipelineId, PipelineHandle>> {
        Ok(self
            .pipelines
            .iter()
            .map(|id| (id.clone(), PipelineHandle::new(id.clone(), "openai", "gpt-4")))
            .collect())
    }

    async fn get_pipeline(&self, pipeline_id: &str) -> Result<Option<PipelineHandle>> {
        Ok(self
            .pipelines
            .iter()
            .find(|id| *id == pipeline_id)
            .map(|id| PipelineHandle::new(id.clone(), "openai", "gpt-4")))
    }
}

pub(super) struct FakeLoadBalancer {
    healthy: Vec<PipelineId>,
    fail: bool,
    panic: bool,
}

impl FakeLoadBalancer {
    pub fn healthy(pipelines: &[&str]) -> Self {
        Self {
            healthy: pipelines.iter().map(|p| p.to_string()).collect(),
            fail: false,
            panic: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            healthy: Vec::new(),
            fail: true,
            panic: false,
        }
    }

    pub fn panicking() -> Self {
        Self {
            healthy: Vec::new(),
            fail: false,
            panic: true,
        }
    }
}

#[async_trait]
impl LoadBalancer for FakeLoadBalancer {
    async fn select_pipeline(&self, candidates: &[PipelineId]) -> Result<PipelineId> {
        candidates
            .first()
            .cloned()
            .ok_or_else(|| GatewayError::load_balancer("no candidates"))
    }

    async fn get_healthy_pipelines(&self, pipeline_ids: &[PipelineId]) -> Result<Vec<PipelineId>> {
        if self.panic {
            panic!("health map poisoned");
        }
        if self.fail {
            return Err(GatewayError::load_balancer("health check backend down"));
        }
        Ok(pipeline_ids
            .iter()
            .filter(|id| self.healthy.contains(id))
            .cloned()
            .collect())
    }

    async fn blacklist_pipeline(&self, _: &str, _: Duration, _: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct RecordingLogger {
    pub errors: Mutex<Vec<String>>,
    pub results: Mutex<Vec<String>>,
    pub panic_on_error: bool,
}

impl ErrorLogger for RecordingLogger {
    fn log_error(
        &self,
        error: &PipelineError,
        _context: &ErrorContext,
        classification: &ErrorClassification,
    ) {
        if self.panic_on_error {
            panic!("logger sink unavailable");
        }
        self.errors
            .lock()
            .push(format!("{}:{}", classification.error_type, error.message));
    }

    fn log_handling_result(&self, result: &ErrorHandlingResult, _context: &ErrorContext) {
        self.results.lock().push(result.action_taken.to_string());
    }
}
