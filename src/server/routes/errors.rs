//! Error coordination endpoints
//!
//! - `GET /errors/stats` - counters and active configuration
//! - `POST /errors/stats/reset` - zero the counters
//! - `POST /errors/handle` - run one failure through the coordinator

use crate::core::coordination::{ErrorContext, PipelineError};
use crate::server::response::into_http_response;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, info};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/errors")
            .route("/stats", web::get().to(get_stats))
            .route("/stats/reset", web::post().to(reset_stats))
            .route("/handle", web::post().to(handle_error)),
    );
}

/// Failure reported by an out-of-process pipeline runner
#[derive(Debug, Clone, Deserialize)]
pub struct HandleErrorRequest {
    pub error: PipelineError,
    pub context: ErrorContext,
}

async fn get_stats(state: web::Data<AppState>) -> HttpResponse {
    debug!("Error statistics requested");
    HttpResponse::Ok().json(ApiResponse::success(state.coordinator.get_error_stats()))
}

async fn reset_stats(state: web::Data<AppState>) -> HttpResponse {
    info!("Error statistics reset requested");
    state.coordinator.reset_stats();
    HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "reset": true })))
}

async fn handle_error(
    state: web::Data<AppState>,
    request: web::Json<HandleErrorRequest>,
) -> HttpResponse {
    let HandleErrorRequest { error, context } = request.into_inner();
    debug!(request_id = %context.request_id, "Handling reported pipeline error");

    let result = state.coordinator.handle_error(&error, context).await;
    into_http_response(&result, &error)
}
