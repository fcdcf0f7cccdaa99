//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            GatewayError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            GatewayError::PipelineNotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "PIPELINE_NOT_FOUND",
                self.to_string(),
            ),
            GatewayError::LoadBalancer(_) | GatewayError::PipelineManager(_) => (
                actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
                "PIPELINE_UNAVAILABLE",
                self.to_string(),
            ),
            GatewayError::Serialization(_) | GatewayError::Yaml(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "PARSING_ERROR",
                self.to_string(),
            ),
            GatewayError::Io(_) | GatewayError::Server(_) | GatewayError::Internal(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
