//! Health check endpoint handlers.
//!
//! Used by monitoring and load balancers. Neither endpoint requires
//! credentials.

use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, response::Json};

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{HealthResponse, HealthStatus};
use crate::state::AppState;

/// Basic health check endpoint.
///
/// Returns overall status, version and per-component results.
///
/// # Responses
/// - `200 OK` - Service is healthy
/// - `503 Service Unavailable` - A component is unhealthy
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = BTreeMap::new();
    checks.insert(
        "database".to_string(),
        state.services.health.check_database().await,
    );

    let response = HealthResponse::from_checks(
        crate::pkg_version(),
        jiff::Timestamp::now().to_string(),
        checks,
    );

    let status = match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(response))
}

/// Readiness probe endpoint.
///
/// Indicates whether the service can reach its database.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    if state.services.health.check_database().await.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
