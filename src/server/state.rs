//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::coordination::ErrorCoordinator;
use crate::core::pipeline::{HealthAwareBalancer, PipelineRegistry};
use std::sync::Arc;
use std::time::Instant;

/// HTTP server state shared across handlers
///
/// Every field is behind an `Arc`; cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    pub coordinator: Arc<ErrorCoordinator>,
    pub registry: Arc<PipelineRegistry>,
    pub balancer: Arc<HealthAwareBalancer>,
    started_at: Instant,
}

impl AppState {
    pub fn new(
        config: Config,
        coordinator: Arc<ErrorCoordinator>,
        registry: Arc<PipelineRegistry>,
        balancer: Arc<HealthAwareBalancer>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            coordinator,
            registry,
            balancer,
            started_at: Instant::now(),
        }
    }

    /// Build the coordinator wired to the in-memory registry and balancer
    pub fn with_reference_collaborators(config: Config) -> Self {
        let registry = Arc::new(PipelineRegistry::new());
        let balancer = Arc::new(HealthAwareBalancer::new());
        let coordinator = ErrorCoordinator::builder(config.coordinator().clone())
            .with_load_balancer(balancer.clone())
            .with_pipeline_manager(registry.clone())
            .build();

        Self::new(config, Arc::new(coordinator), registry, balancer)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
