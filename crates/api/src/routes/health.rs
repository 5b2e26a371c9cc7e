use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Service-level health and info, mounted under `/api`.
pub fn service_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::service_health))
        .route("/info", get(health::system_info))
}

/// Deployment probes, mounted under `/api/v1`.
pub fn probe_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/detailed", get(health::detailed_health_check))
        .route("/ready", get(health::readiness_check))
        .route("/live", get(health::liveness_check))
}
