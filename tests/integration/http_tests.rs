//! HTTP translation and admin API tests

#[cfg(test)]
mod tests {
    use crate::common::ErrorFactory;
    use actix_web::{ResponseError, test, web};
    use llm_gateway_recovery::{
        AppState, Config, ErrorContext, GatewayError, HttpServer, PipelineHandle,
        into_http_response,
    };
    use serde_json::{Value, json};

    fn state() -> AppState {
        let state = AppState::with_reference_collaborators(Config::default());
        for id in ["p1", "p2"] {
            state
                .registry
                .register(PipelineHandle::new(id, "openai", "gpt-4o"));
        }
        state
    }

    // ==================== into_http_response ====================

    #[actix_web::test]
    async fn test_retry_after_rounds_up() {
        let state = state();
        let error = ErrorFactory::rate_limited();
        let context = ErrorContext::new("req-1")
            .with_pipeline("p1")
            .with_attempt(1);

        let result = state.coordinator.handle_error(&error, context).await;
        assert_eq!(result.retry_after_ms, Some(2000));

        let response = into_http_response(&result, &error);
        assert_eq!(response.status().as_u16(), 429);
        assert_eq!(response.headers().get("retry-after").unwrap(), "2");
    }

    #[actix_web::test]
    async fn test_returned_error_body_shape() {
        let state = state();
        let error = ErrorFactory::invalid_request();
        let context = ErrorContext::new("req-2")
            .with_pipeline("p1")
            .with_provider("openai")
            .with_model("gpt-4o");

        let result = state.coordinator.handle_error(&error, context).await;
        let response = into_http_response(&result, &error);
        assert_eq!(response.status().as_u16(), 400);

        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["message"], "'messages' is a required property");
        assert_eq!(body["error"]["requestId"], "req-2");
        assert_eq!(body["error"]["httpStatusCode"], 400);
        assert_eq!(body["error"]["provider"], "openai");
        assert_eq!(body["error"]["model"], "gpt-4o");
        assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
        assert_eq!(body["error"]["module"], "request-validator");
        assert!(body["error"]["timestamp"].is_string());
    }

    // ==================== Admin API ====================

    #[actix_web::test]
    async fn test_admin_stats_track_reported_errors() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(state()))).await;

        for message in ["connection reset by peer", "invalid model name"] {
            let req = test::TestRequest::post()
                .uri("/errors/handle")
                .set_json(json!({
                    "error": { "message": message },
                    "context": { "requestId": "req-3", "maxAttempts": 3 }
                }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/errors/stats").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let stats = &body["data"];
        assert_eq!(stats["totalErrors"], 2);
        assert_eq!(stats["errorsByType"]["CONNECTION"], 1);
        assert_eq!(stats["errorsByType"]["VALIDATION"], 1);
        assert_eq!(stats["errorsByType"]["TIMEOUT"], 0);
        assert_eq!(stats["config"]["max_attempts"], 3);
    }

    #[actix_web::test]
    async fn test_report_without_budget_uses_configured_max_attempts() {
        let mut config = Config::default();
        config.gateway.coordinator.max_attempts = 5;
        let state = AppState::with_reference_collaborators(config);
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let report = |attempt: u32| {
            test::TestRequest::post()
                .uri("/errors/handle")
                .set_json(json!({
                    "error": { "message": "request timed out" },
                    "context": { "requestId": "req-4", "attemptNumber": attempt }
                }))
                .to_request()
        };

        let resp = test::call_service(&app, report(3)).await;
        assert_eq!(resp.status().as_u16(), 429);

        let resp = test::call_service(&app, report(5)).await;
        assert_eq!(resp.status().as_u16(), 408);
    }

    #[actix_web::test]
    async fn test_failed_destroy_reports_original_error() {
        let state = AppState::with_reference_collaborators(Config::default());
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::post()
            .uri("/errors/handle")
            .set_json(json!({
                "error": { "message": "upstream connection refused by api.openai.com" },
                "context": { "requestId": "req-5", "pipelineId": "ghost", "attemptNumber": 3 }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 503);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"]["message"],
            "upstream connection refused by api.openai.com"
        );
        assert_eq!(body["error"]["requestId"], "req-5");
    }

    #[actix_web::test]
    async fn test_malformed_report_is_rejected() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(state()))).await;

        let req = test::TestRequest::post()
            .uri("/errors/handle")
            .set_json(json!({ "error": "not an object" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }

    #[::core::prelude::v1::test]
    fn test_gateway_error_status_codes() {
        assert_eq!(
            GatewayError::pipeline_not_found("p9")
                .error_response()
                .status()
                .as_u16(),
            404
        );
        assert_eq!(
            GatewayError::load_balancer("down")
                .error_response()
                .status()
                .as_u16(),
            503
        );
        assert_eq!(
            GatewayError::config("bad")
                .error_response()
                .status()
                .as_u16(),
            500
        );
    }
}
