//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Liveness probe - the process is up
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Basic health - service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness probe - verifies the vector index is reachable
///
/// Reported as degraded rather than failing outright, since the gateway
/// can still generate and execute queries without the cache.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let status = match state.cache.ensure_collection().await {
        Ok(()) => HealthStatus::Healthy,
        Err(_) => HealthStatus::Degraded,
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
