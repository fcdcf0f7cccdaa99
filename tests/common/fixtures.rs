//! Test fixtures and factories

use llm_gateway_recovery::{
    CoordinatorConfig, ErrorCode, ErrorCoordinator, HealthAwareBalancer, PipelineError,
    PipelineHandle, PipelineRegistry,
};
use std::sync::Arc;

/// Coordinator wired to a registry and a balancer the test can inspect
pub struct GatewayFixture {
    pub coordinator: ErrorCoordinator,
    pub registry: Arc<PipelineRegistry>,
    pub balancer: Arc<HealthAwareBalancer>,
}

impl GatewayFixture {
    pub fn with_pipelines(ids: &[&str]) -> Self {
        Self::with_config(CoordinatorConfig::default(), ids)
    }

    pub fn with_config(config: CoordinatorConfig, ids: &[&str]) -> Self {
        let registry = Arc::new(PipelineRegistry::new());
        for id in ids {
            registry.register(PipelineHandle::new(*id, "openai", "gpt-4o"));
        }
        let balancer = Arc::new(HealthAwareBalancer::new());

        let coordinator = ErrorCoordinator::builder(config)
            .with_load_balancer(balancer.clone())
            .with_pipeline_manager(registry.clone())
            .build();

        Self {
            coordinator,
            registry,
            balancer,
        }
    }
}

/// Pipeline errors as real modules raise them
pub struct ErrorFactory;

impl ErrorFactory {
    pub fn connection_refused() -> PipelineError {
        PipelineError::with_code(ErrorCode::ConnectionRefused, "connect ECONNREFUSED 10.0.0.7:443")
            .in_module("http-client")
    }

    pub fn upstream_timeout() -> PipelineError {
        PipelineError::new("Upstream request timed out after 30000ms").in_module("provider")
    }

    pub fn rate_limited() -> PipelineError {
        PipelineError::new("429 Too Many Requests: rate limit reached for gpt-4o")
            .with_status(429)
    }

    pub fn invalid_request() -> PipelineError {
        PipelineError::with_code(
            ErrorCode::MissingRequiredField,
            "'messages' is a required property",
        )
        .in_module("request-validator")
    }

    pub fn bad_api_key() -> PipelineError {
        PipelineError::new("Incorrect API key provided").with_status(401)
    }
}
