use axum::{Json, extract::State};
use reportcard_core::{AppError, ErrorResponse};
use reportcard_models::{
    BatchGenerateRequest, BatchGenerateResponse, GenerateReportRequest, GenerateReportResponse,
};
use tracing::instrument;

use crate::modules::reports::service::ReportService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Generate one student's report card
#[utoipa::path(
    post,
    path = "/api/generate-word-report",
    summary = "Generate report card",
    request_body = GenerateReportRequest,
    responses(
        (status = 200, description = "Report card generated, content is base64 encoded", body = GenerateReportResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Template or data store failure", body = ErrorResponse)
    ),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn generate_word_report(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateReportRequest>,
) -> Result<Json<GenerateReportResponse>, AppError> {
    let response = ReportService::generate_report(&state, request).await?;
    Ok(Json(response))
}

/// Generate report cards for several students
#[utoipa::path(
    post,
    path = "/api/batch-generate",
    summary = "Batch generate report cards",
    description = "Processes every listed student. A failure for one student is recorded in its outcome and does not affect the others.",
    request_body = BatchGenerateRequest,
    responses(
        (status = 200, description = "Batch processed, one outcome per student in request order", body = BatchGenerateResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse)
    ),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn batch_generate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BatchGenerateRequest>,
) -> Result<Json<BatchGenerateResponse>, AppError> {
    let response = ReportService::batch_generate(&state, request).await?;
    Ok(Json(response))
}
