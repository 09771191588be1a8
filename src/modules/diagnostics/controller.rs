use axum::{Json, extract::State, http::StatusCode};
use reportcard_models::{DiagnosticsResponse, ProviderCheckResponse};
use tracing::{error, instrument};

use crate::modules::diagnostics::service::DiagnosticsService;
use crate::state::AppState;

/// Backend and template diagnostics
#[utoipa::path(
    get,
    path = "/api/test",
    summary = "Backend diagnostics",
    responses(
        (status = 200, description = "Template and data store configuration", body = DiagnosticsResponse)
    ),
    tag = "Diagnostics"
)]
#[instrument(skip(state))]
pub async fn test_backend(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    Json(DiagnosticsService::describe(&state))
}

/// Data store connectivity check
#[utoipa::path(
    get,
    path = "/api/test-firebase",
    summary = "Data store connectivity",
    responses(
        (status = 200, description = "Data store reachable", body = ProviderCheckResponse),
        (status = 500, description = "Data store unreachable", body = ProviderCheckResponse)
    ),
    tag = "Diagnostics"
)]
#[instrument(skip(state))]
pub async fn test_provider(
    State(state): State<AppState>,
) -> (StatusCode, Json<ProviderCheckResponse>) {
    match DiagnosticsService::check_provider(&state).await {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(e) => {
            error!(error = %e, "Data store connectivity check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProviderCheckResponse {
                    success: false,
                    message: format!("Firebase error: {e}"),
                    provider: state.provider.name().to_string(),
                }),
            )
        }
    }
}
