//! Health check HTTP handler

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::web::{
    AppState,
    extractors::RequestContext,
    responses::{ApiResponse, HealthResponse},
    utils::log_request,
};

/// Health check endpoint
///
/// Reports database connectivity; answers 503 when the database is unreachable.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse),
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    let connected = match state.database.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check database ping failed: {}", e);
            false
        }
    };

    let health = HealthResponse::new(connected);
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(ApiResponse::success(health))).into_response()
}
