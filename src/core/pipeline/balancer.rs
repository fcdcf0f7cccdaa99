//! In-memory, health-aware load balancer
//!
//! Tracks a health mark per pipeline plus time-bounded blacklist entries and
//! selects among candidates round-robin.

use super::traits::{LoadBalancer, PipelineId};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Health mark for a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineHealth {
    /// Never reported; treated as selectable
    #[default]
    Unknown,
    Healthy,
    /// Working but impaired; still selectable
    Degraded,
    Unhealthy,
}

impl PipelineHealth {
    pub fn is_selectable(self) -> bool {
        !matches!(self, PipelineHealth::Unhealthy)
    }
}

#[derive(Debug, Clone)]
struct BlacklistEntry {
    until: Instant,
    reason: String,
}

/// Round-robin load balancer honouring health marks and blacklists
#[derive(Debug, Default)]
pub struct HealthAwareBalancer {
    health: RwLock<HashMap<PipelineId, PipelineHealth>>,
    blacklist: DashMap<PipelineId, BlacklistEntry>,
    cursor: AtomicUsize,
}

impl HealthAwareBalancer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_health(&self, pipeline_id: impl Into<PipelineId>, health: PipelineHealth) {
        let pipeline_id = pipeline_id.into();
        debug!("Pipeline {} health set to {:?}", pipeline_id, health);
        self.health.write().insert(pipeline_id, health);
    }

    pub fn health_of(&self, pipeline_id: &str) -> PipelineHealth {
        self.health
            .read()
            .get(pipeline_id)
            .copied()
            .unwrap_or_default()
    }

    /// Whether the pipeline is blacklisted right now
    ///
    /// Expired entries are dropped on the way.
    pub fn is_blacklisted(&self, pipeline_id: &str) -> bool {
        let expired = match self.blacklist.get(pipeline_id) {
            Some(entry) => entry.until <= Instant::now(),
            None => return false,
        };

        if expired {
            self.blacklist.remove(pipeline_id);
            debug!("Blacklist entry for pipeline {} expired", pipeline_id);
            return false;
        }
        true
    }

    /// Reason recorded for an active blacklist entry
    pub fn blacklist_reason(&self, pipeline_id: &str) -> Option<String> {
        if !self.is_blacklisted(pipeline_id) {
            return None;
        }
        self.blacklist
            .get(pipeline_id)
            .map(|entry| entry.reason.clone())
    }

    fn is_available(&self, pipeline_id: &str) -> bool {
        self.health_of(pipeline_id).is_selectable() && !self.is_blacklisted(pipeline_id)
    }
}

#[async_trait]
impl LoadBalancer for HealthAwareBalancer {
    async fn select_pipeline(&self, candidates: &[PipelineId]) -> Result<PipelineId> {
        if candidates.is_empty() {
            return Err(GatewayError::load_balancer("No candidate pipelines to select from"));
        }

        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % candidates.len();
        Ok(candidates[index].clone())
    }

    async fn get_healthy_pipelines(&self, pipeline_ids: &[PipelineId]) -> Result<Vec<PipelineId>> {
        Ok(pipeline_ids
            .iter()
            .filter(|id| self.is_available(id))
            .cloned()
            .collect())
    }

    async fn blacklist_pipeline(
        &self,
        pipeline_id: &str,
        duration: Duration,
        reason: &str,
    ) -> Result<()> {
        info!(
            "Blacklisting pipeline {} for {:?}: {}",
            pipeline_id, duration, reason
        );
        self.blacklist.insert(
            pipeline_id.to_string(),
            BlacklistEntry {
                until: Instant::now() + duration,
                reason: reason.to_string(),
            },
        );
        Ok(())
    }
}
