//! Health, readiness, liveness and info endpoints.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use scada_core::types::Timestamp;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::system::{self, DiskStats, LoadAverage, MemoryStats};

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// `GET /api/health` payload.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    pub timestamp: Timestamp,
    pub service: String,
}

/// `GET /api/info` payload.
#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub application: String,
    pub version: &'static str,
    /// Capitalised OS name, e.g. `Linux`.
    pub platform: &'static str,
    pub arch: &'static str,
    pub timestamp: Timestamp,
    /// Whether the simulated machine is running.
    pub machine_status: bool,
}

/// `GET /api/v1/health` payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
    pub uptime: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PlatformInfo {
    pub platform: &'static str,
    pub platform_version: Option<String>,
    pub os: &'static str,
    pub family: &'static str,
    pub arch: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HostMetrics {
    pub cpu_percent: Option<f64>,
    pub memory: Option<MemoryStats>,
    pub disk: Option<DiskStats>,
    pub load_average: Option<LoadAverage>,
}

#[derive(Debug, Serialize)]
pub struct StoreCounts {
    pub items: usize,
    pub users: usize,
}

/// `GET /api/v1/health/detailed` payload.
#[derive(Debug, Serialize)]
pub struct DetailedHealth {
    pub status: &'static str,
    pub timestamp: Timestamp,
    pub system: PlatformInfo,
    pub metrics: HostMetrics,
    pub stores: StoreCounts,
}

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/health
pub async fn service_health(State(state): State<AppState>) -> Json<ServiceHealth> {
    Json(ServiceHealth {
        status: "healthy",
        timestamp: Utc::now(),
        service: state.config.service_name.clone(),
    })
}

/// GET /api/info
///
/// Reads the running flag without advancing the simulation.
pub async fn system_info(State(state): State<AppState>) -> Json<SystemInfo> {
    let machine_status = state.machine.lock().await.snapshot().running;

    Json(SystemInfo {
        application: state.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        platform: system::platform_name(),
        arch: std::env::consts::ARCH,
        timestamp: Utc::now(),
        machine_status,
    })
}

/// GET /api/v1/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        uptime: "running",
        service: "api",
    })
}

/// GET /api/v1/health/detailed
///
/// CPU usage is sampled over a short interval, so metrics are collected on
/// a blocking task.
pub async fn detailed_health_check(
    State(state): State<AppState>,
) -> AppResult<Json<DetailedHealth>> {
    let metrics = tokio::task::spawn_blocking(collect_host_metrics)
        .await
        .map_err(|e| AppError::InternalError(format!("Host metrics task failed: {e}")))?;
    let stores = StoreCounts {
        items: state.items.count().await,
        users: state.users.count().await,
    };

    Ok(Json(DetailedHealth {
        status: "healthy",
        timestamp: Utc::now(),
        system: PlatformInfo {
            platform: system::platform_name(),
            platform_version: system::kernel_version(),
            os: std::env::consts::OS,
            family: std::env::consts::FAMILY,
            arch: std::env::consts::ARCH,
            version: env!("CARGO_PKG_VERSION"),
        },
        metrics,
        stores,
    }))
}

fn collect_host_metrics() -> HostMetrics {
    HostMetrics {
        cpu_percent: system::cpu_percent(),
        memory: system::memory_stats(),
        disk: system::disk_stats("/"),
        load_average: system::load_average(),
    }
}

/// GET /api/v1/ready
pub async fn readiness_check() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "ready" })
}

/// GET /api/v1/live
pub async fn liveness_check() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "alive" })
}
