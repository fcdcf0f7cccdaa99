//! End-to-end recovery scenarios

#[cfg(test)]
mod tests {
    use crate::common::{ErrorFactory, GatewayFixture};
    use llm_gateway_recovery::{
        ActionTaken, CoordinatorConfig, ErrorContext, ErrorType, PipelineHealth, PipelineManager,
    };

    // ==================== Retry ====================

    #[tokio::test]
    async fn test_retry_delays_grow_until_attempts_run_out() {
        let fixture = GatewayFixture::with_pipelines(&["p1"]);
        let error = ErrorFactory::upstream_timeout();

        let mut context = ErrorContext::new("req-1").with_pipeline("p1");
        let mut delays = Vec::new();
        loop {
            context.record_error(&error);
            let result = fixture
                .coordinator
                .handle_error(&error, context.clone())
                .await;
            if result.action_taken != ActionTaken::Retry {
                let details = result.returned_error.expect("returned error");
                assert!(details.max_retries_exceeded);
                assert_eq!(details.http_status_code, 408);
                break;
            }
            delays.push(result.retry_after_ms.unwrap_or_default());
            context = context.next_attempt();
        }

        assert_eq!(delays, vec![1000, 2000, 4000]);
        assert_eq!(context.error_chain().len(), 4);
        assert_eq!(context.attempt_number, 3);
    }

    // ==================== Switch and destroy ====================

    #[tokio::test]
    async fn test_exhausted_connection_error_switches_to_healthy_pipeline() {
        let fixture = GatewayFixture::with_pipelines(&["p1", "p2", "p3"]);
        fixture.balancer.set_health("p2", PipelineHealth::Unhealthy);

        let context = ErrorContext::new("req-2")
            .with_pipeline("p1")
            .with_attempt(3);
        let result = fixture
            .coordinator
            .handle_error(&ErrorFactory::connection_refused(), context)
            .await;

        assert!(result.success);
        assert_eq!(result.action_taken, ActionTaken::Switched);
        assert_eq!(result.switched_to_pipeline.as_deref(), Some("p3"));
        assert_eq!(fixture.registry.len(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_connection_error_destroys_lone_pipeline() {
        let fixture = GatewayFixture::with_pipelines(&["p1"]);

        let context = ErrorContext::new("req-3")
            .with_pipeline("p1")
            .with_attempt(3);
        let result = fixture
            .coordinator
            .handle_error(&ErrorFactory::connection_refused(), context)
            .await;

        assert!(result.success);
        assert_eq!(result.action_taken, ActionTaken::Destroyed);
        assert_eq!(result.destroyed_pipeline.as_deref(), Some("p1"));
        assert!(!fixture.registry.contains("p1"));
        assert!(
            fixture
                .registry
                .get_pipeline("p1")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_destroying_missing_pipeline_is_reported_not_raised() {
        let fixture = GatewayFixture::with_pipelines(&["p2"]);
        fixture.balancer.set_health("p2", PipelineHealth::Unhealthy);

        let context = ErrorContext::new("req-4")
            .with_pipeline("ghost")
            .with_attempt(3);
        let result = fixture
            .coordinator
            .handle_error(&ErrorFactory::connection_refused(), context)
            .await;

        assert!(!result.success);
        assert_eq!(result.action_taken, ActionTaken::Returned);
        let details = result.returned_error.expect("returned error");
        assert_eq!(details.message, "connect ECONNREFUSED 10.0.0.7:443");
        assert_eq!(details.error_type, Some(ErrorType::Connection));
        assert!(
            details
                .underlying_error
                .as_deref()
                .unwrap_or_default()
                .contains("Failed to destroy pipeline ghost")
        );
    }

    #[tokio::test]
    async fn test_destroy_disabled_returns_exhausted_error() {
        let config = CoordinatorConfig {
            enable_pipeline_destroy: false,
            ..CoordinatorConfig::default()
        };
        let fixture = GatewayFixture::with_config(config, &["p1"]);

        let context = ErrorContext::new("req-5")
            .with_pipeline("p1")
            .with_attempt(3);
        let result = fixture
            .coordinator
            .handle_error(&ErrorFactory::connection_refused(), context)
            .await;

        assert_eq!(result.action_taken, ActionTaken::Returned);
        let details = result.returned_error.expect("returned error");
        assert_eq!(details.http_status_code, 503);
        assert!(details.max_retries_exceeded);
        assert!(fixture.registry.contains("p1"));
    }

    // ==================== Returned errors ====================

    #[tokio::test]
    async fn test_invalid_request_is_never_retried() {
        let fixture = GatewayFixture::with_pipelines(&["p1", "p2"]);

        let result = fixture
            .coordinator
            .handle_error(
                &ErrorFactory::invalid_request(),
                ErrorContext::new("req-6").with_pipeline("p1"),
            )
            .await;

        assert_eq!(result.action_taken, ActionTaken::Returned);
        let details = result.returned_error.expect("returned error");
        assert_eq!(details.http_status_code, 400);
        assert!(details.fatal);
        assert_eq!(details.error_type, Some(ErrorType::Validation));
    }

    #[tokio::test]
    async fn test_bad_api_key_returns_401() {
        let fixture = GatewayFixture::with_pipelines(&["p1", "p2"]);

        let result = fixture
            .coordinator
            .handle_error(&ErrorFactory::bad_api_key(), ErrorContext::new("req-7"))
            .await;

        assert_eq!(result.action_taken, ActionTaken::Returned);
        assert_eq!(result.http_status(), 401);
    }

    // ==================== Statistics ====================

    #[tokio::test]
    async fn test_stats_reflect_handled_errors() {
        let fixture = GatewayFixture::with_pipelines(&["p1", "p2"]);
        let context = || ErrorContext::new("req").with_pipeline("p1");

        for error in [
            ErrorFactory::rate_limited(),
            ErrorFactory::rate_limited(),
            ErrorFactory::invalid_request(),
            ErrorFactory::bad_api_key(),
        ] {
            fixture.coordinator.handle_error(&error, context()).await;
        }

        let stats = fixture.coordinator.get_error_stats();
        assert_eq!(stats.total_errors, 4);
        assert_eq!(stats.errors_by_type[&ErrorType::RateLimit], 2);
        assert_eq!(stats.errors_by_type[&ErrorType::Validation], 1);
        assert_eq!(stats.errors_by_type[&ErrorType::Auth], 1);
        assert_eq!(
            stats.errors_by_type.values().sum::<u64>(),
            stats.total_errors
        );
        assert_eq!(stats.actions_taken[&ActionTaken::Retry], 2);
        assert_eq!(stats.actions_taken[&ActionTaken::Returned], 2);

        fixture.coordinator.reset_stats();
        assert_eq!(fixture.coordinator.get_error_stats().total_errors, 0);
    }
}
