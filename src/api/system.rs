//! Liveness and readiness probes.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{AppState, HealthLiveResponse, HealthReadinessChecks, HealthReadyResponse};

/// `GET /health`
///
/// Answers as long as the process serves requests; touches nothing else.
pub async fn health_live() -> Json<HealthLiveResponse> {
    Json(HealthLiveResponse { status: "ok" })
}

/// `GET /health/ready`
///
/// 503 until the database answers a ping.
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Response {
    let database = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed: database unreachable");
            false
        }
    };

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthReadyResponse {
            ready: database,
            checks: HealthReadinessChecks { database },
        }),
    )
        .into_response()
}
