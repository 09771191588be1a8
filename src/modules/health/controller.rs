use axum::Json;
use reportcard_models::HealthResponse;

/// Service liveness
#[utoipa::path(
    get,
    path = "/api/health",
    summary = "Health check",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
