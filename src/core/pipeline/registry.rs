//! In-memory pipeline manager

use super::traits::{PipelineHandle, PipelineId, PipelineManager};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use tracing::{debug, info};

/// Pipeline registry backed by a concurrent map
#[derive(Debug, Default)]
pub struct PipelineRegistry {
    pipelines: DashMap<PipelineId, PipelineHandle>,
}

impl PipelineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pipeline, replacing any previous one with the same id
    pub fn register(&self, handle: PipelineHandle) {
        info!(
            "Registered pipeline {} ({}/{})",
            handle.id, handle.provider, handle.model
        );
        self.pipelines.insert(handle.id.clone(), handle);
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    pub fn contains(&self, pipeline_id: &str) -> bool {
        self.pipelines.contains_key(pipeline_id)
    }
}

#[async_trait]
impl PipelineManager for PipelineRegistry {
    async fn destroy_pipeline(&self, pipeline_id: &str) -> Result<bool> {
        match self.pipelines.remove(pipeline_id) {
            Some((id, _)) => {
                info!("Destroyed pipeline {}", id);
                Ok(true)
            }
            None => {
                debug!("Pipeline {} already gone", pipeline_id);
                Err(GatewayError::pipeline_not_found(pipeline_id))
            }
        }
    }

    async fn get_all_pipelines(&self) -> Result<HashMap<PipelineId, PipelineHandle>> {
        Ok(self
            .pipelines
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    async fn get_pipeline(&self, pipeline_id: &str) -> Result<Option<PipelineHandle>> {
        Ok(self
            .pipelines
            .get(pipeline_id)
            .map(|entry| entry.value().clone()))
    }
}
