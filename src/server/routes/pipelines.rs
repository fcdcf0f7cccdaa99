//! Pipeline inspection endpoints
//!
//! Lists registered pipelines with their health and lets operators mark
//! health or blacklist a pipeline by hand.

use crate::core::pipeline::{LoadBalancer, PipelineHandle, PipelineHealth, PipelineManager};
use crate::server::routes::{ApiResponse, responses};
use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pipelines")
            .route("", web::get().to(list_pipelines))
            .route("/{id}/health", web::put().to(set_health))
            .route("/{id}/blacklist", web::post().to(blacklist)),
    );
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PipelineStatus {
    #[serde(flatten)]
    pipeline: PipelineHandle,
    health: PipelineHealth,
    blacklisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    blacklist_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthUpdate {
    pub health: PipelineHealth,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlacklistRequest {
    pub duration_secs: u64,
    pub reason: String,
}

async fn list_pipelines(state: web::Data<AppState>) -> HttpResponse {
    debug!("Pipeline listing requested");

    let pipelines = match state.registry.get_all_pipelines().await {
        Ok(pipelines) => pipelines,
        Err(e) => return responses::gateway_error_to_response(e),
    };

    let mut statuses: Vec<PipelineStatus> = pipelines
        .into_values()
        .map(|pipeline| {
            let blacklist_reason = state.balancer.blacklist_reason(&pipeline.id);
            PipelineStatus {
                health: state.balancer.health_of(&pipeline.id),
                blacklisted: blacklist_reason.is_some(),
                blacklist_reason,
                pipeline,
            }
        })
        .collect();
    statuses.sort_by(|a, b| a.pipeline.id.cmp(&b.pipeline.id));

    HttpResponse::Ok().json(ApiResponse::success(statuses))
}

async fn set_health(
    state: web::Data<AppState>,
    path: web::Path<String>,
    update: web::Json<HealthUpdate>,
) -> HttpResponse {
    let pipeline_id = path.into_inner();
    if !state.registry.contains(&pipeline_id) {
        return responses::not_found(&format!("Pipeline not found: {}", pipeline_id));
    }

    info!("Marking pipeline {} as {:?}", pipeline_id, update.health);
    state.balancer.set_health(pipeline_id.clone(), update.health);
    HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "id": pipeline_id,
        "health": update.health,
    })))
}

async fn blacklist(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<BlacklistRequest>,
) -> HttpResponse {
    let pipeline_id = path.into_inner();
    if request.duration_secs == 0 {
        return responses::bad_request("duration_secs must be greater than 0");
    }
    if !state.registry.contains(&pipeline_id) {
        return responses::not_found(&format!("Pipeline not found: {}", pipeline_id));
    }

    let duration = Duration::from_secs(request.duration_secs);
    match state
        .balancer
        .blacklist_pipeline(&pipeline_id, duration, &request.reason)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
            "id": pipeline_id,
            "blacklistedForSecs": request.duration_secs,
        }))),
        Err(e) => responses::gateway_error_to_response(e),
    }
}
