//! Collaborator traits consumed by error coordination
//!
//! Pipeline construction, health checking and selection algorithms live
//! outside the coordinator. It only sees them through these traits.

use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Pipeline identifier
pub type PipelineId = String;

/// Descriptor of a live pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineHandle {
    pub id: PipelineId,
    pub provider: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl PipelineHandle {
    pub fn new(
        id: impl Into<PipelineId>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            provider: provider.into(),
            model: model.into(),
            created_at: Utc::now(),
            metadata: HashMap::new(),
        }
    }
}

/// Owner of pipeline lifecycles
#[async_trait]
pub trait PipelineManager: Send + Sync {
    /// Tear down a pipeline
    ///
    /// `Ok(false)` means the manager declined; errors cover teardown failures
    /// and pipelines that are already gone.
    async fn destroy_pipeline(&self, pipeline_id: &str) -> Result<bool>;

    /// All known pipelines keyed by id
    async fn get_all_pipelines(&self) -> Result<HashMap<PipelineId, PipelineHandle>>;

    async fn get_pipeline(&self, pipeline_id: &str) -> Result<Option<PipelineHandle>>;
}

/// Pipeline health and selection
#[async_trait]
pub trait LoadBalancer: Send + Sync {
    /// Pick one pipeline out of `candidates`
    async fn select_pipeline(&self, candidates: &[PipelineId]) -> Result<PipelineId>;

    /// Subset of `pipeline_ids` currently considered healthy
    async fn get_healthy_pipelines(&self, pipeline_ids: &[PipelineId]) -> Result<Vec<PipelineId>>;

    /// Exclude a pipeline from selection for `duration`
    async fn blacklist_pipeline(
        &self,
        pipeline_id: &str,
        duration: Duration,
        reason: &str,
    ) -> Result<()>;
}
