//! Health probes.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthReadinessChecks {
    pub database: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub checks: HealthReadinessChecks,
}

/// `GET /api/system/health/live`
///
/// Lightweight liveness probe to indicate the process is running.
pub async fn health_live(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::success(HealthLiveResponse {
        status: "alive",
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}

/// `GET /api/system/health/ready`
///
/// Readiness probe; 503 while the database cannot be reached.
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Response {
    let db_ready = state.store().ping().await.is_ok();

    let status = if db_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::success(HealthReadyResponse {
            ready: db_ready,
            checks: HealthReadinessChecks { database: db_ready },
        })),
    )
        .into_response()
}
