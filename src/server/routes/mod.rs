//! HTTP route modules
//!
//! Admin endpoints of the error coordination service, grouped by concern.

pub mod errors;
pub mod health;
pub mod pipelines;

use actix_web::{HttpResponse, web};

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Register every admin route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(errors::configure_routes)
        .configure(pipelines::configure_routes);
}

/// Error response helpers
pub mod responses {
    use super::*;
    use crate::utils::error::GatewayError;
    use actix_web::ResponseError;

    /// Convert a GatewayError raised by a handler into an HTTP response
    pub fn gateway_error_to_response(error: GatewayError) -> HttpResponse {
        error.error_response()
    }

    pub fn not_found(message: &str) -> HttpResponse {
        HttpResponse::NotFound().json(ApiResponse::<()>::error(message.to_string()))
    }

    pub fn bad_request(message: &str) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::<()>::error(message.to_string()))
    }
}
