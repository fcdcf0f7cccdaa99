//! Configuration loading tests

#[cfg(test)]
mod tests {
    use llm_gateway_recovery::config::Validate;
    use llm_gateway_recovery::{BackoffStrategy, Config, CoordinatorConfig, GatewayError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_minimal_file_uses_defaults() {
        let file = write_config("server:\n  port: 9000\n");
        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.server().port, 9000);
        assert_eq!(config.server().host, "0.0.0.0");
        assert_eq!(config.logging().level, "info");
        assert_eq!(config.coordinator(), &CoordinatorConfig::default());
    }

    #[tokio::test]
    async fn test_invalid_delays_are_rejected() {
        let file = write_config(
            "coordinator:\n  base_delay_ms: 5000\n  max_delay_ms: 1000\n",
        );
        let err = Config::from_file(file.path()).await.unwrap_err();

        assert!(matches!(err, GatewayError::Config(_)));
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[tokio::test]
    async fn test_unknown_backoff_strategy_is_a_parse_error() {
        let file = write_config("coordinator:\n  backoff_strategy: linear\n");
        assert!(Config::from_file(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_yaml_round_trip_through_file() {
        let mut config = Config::default();
        config.gateway.coordinator.backoff_strategy = BackoffStrategy::Fixed;
        config.gateway.coordinator.max_attempts = 7;

        let file = write_config(&config.to_yaml().unwrap());
        let loaded = Config::from_file(file.path()).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_environment_overrides() {
        // Single test so the process environment is not raced by siblings
        unsafe {
            std::env::set_var("GATEWAY_PORT", "8123");
            std::env::set_var("GATEWAY_MAX_ATTEMPTS", "5");
            std::env::set_var("GATEWAY_BACKOFF_STRATEGY", "adaptive");
            std::env::set_var("GATEWAY_PIPELINE_DESTROY", "false");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.server().port, 8123);
        assert_eq!(config.coordinator().max_attempts, 5);
        assert_eq!(
            config.coordinator().backoff_strategy,
            BackoffStrategy::Adaptive
        );
        assert!(!config.coordinator().enable_pipeline_destroy);
        assert!(config.coordinator().enable_retry);

        unsafe {
            std::env::set_var("GATEWAY_MAX_ATTEMPTS", "lots");
        }
        assert!(matches!(Config::from_env(), Err(GatewayError::Config(_))));

        unsafe {
            std::env::remove_var("GATEWAY_PORT");
            std::env::remove_var("GATEWAY_MAX_ATTEMPTS");
            std::env::remove_var("GATEWAY_BACKOFF_STRATEGY");
            std::env::remove_var("GATEWAY_PIPELINE_DESTROY");
        }
    }

    #[test]
    fn test_coordinator_validation() {
        let config = CoordinatorConfig {
            max_attempts: 0,
            ..CoordinatorConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(CoordinatorConfig::default().validate().is_ok());
    }
}
