//! Health check and version endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/version", web::get().to(version_info));
}

/// Basic health check endpoint
///
/// Reports liveness plus a few coordination figures; used by load balancers
/// and monitoring systems.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        uptime_seconds: state.uptime_seconds(),
        registered_pipelines: state.registry.len(),
        total_errors: state.coordinator.get_error_stats().total_errors,
    };

    HttpResponse::Ok().json(ApiResponse::success(health_status))
}

/// Version and build information
async fn version_info() -> HttpResponse {
    debug!("Version info requested");

    let version_info = VersionInfo {
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        build_time: Cow::Borrowed(env!("BUILD_TIME")),
        git_hash: Cow::Borrowed(env!("GIT_HASH")),
        rust_version: Cow::Borrowed(env!("RUST_VERSION")),
    };

    HttpResponse::Ok().json(ApiResponse::success(version_info))
}

#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
    uptime_seconds: u64,
    registered_pipelines: usize,
    total_errors: u64,
}

#[derive(Debug, Clone, serde::Serialize)]
struct VersionInfo {
    version: Cow<'static, str>,
    build_time: Cow<'static, str>,
    git_hash: Cow<'static, str>,
    rust_version: Cow<'static, str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_serialization() {
        let info = VersionInfo {
            version: Cow::Borrowed("0.1.0"),
            build_time: Cow::Borrowed("0"),
            git_hash: Cow::Borrowed("abc123"),
            rust_version: Cow::Borrowed("rustc 1.87.0"),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["git_hash"], "abc123");
    }
}
