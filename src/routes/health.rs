use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status, always "ok" while the process is serving
    pub status: String,
    /// API version
    pub version: String,
}

/// Liveness endpoint.
///
/// Returns 200 with a trivial body. Must stay responsive even after another
/// request has failed unexpectedly; the per-request panic boundary keeps
/// faults from reaching the dispatch loop.
#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse),
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
