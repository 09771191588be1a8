use utoipa::OpenApi;

use reportcard_core::ErrorResponse;
use reportcard_models::{
    BatchGenerateRequest, BatchGenerateResponse, BatchOutcome, BatchSummary,
    DiagnosticsResponse, GenerateReportRequest, GenerateReportResponse, HealthResponse,
    ProviderCheckResponse, ReportDocument,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::reports::controller::generate_word_report,
        crate::modules::reports::controller::batch_generate,
        crate::modules::diagnostics::controller::test_backend,
        crate::modules::diagnostics::controller::test_provider,
    ),
    components(
        schemas(
            HealthResponse,
            GenerateReportRequest,
            GenerateReportResponse,
            ReportDocument,
            BatchGenerateRequest,
            BatchGenerateResponse,
            BatchOutcome,
            BatchSummary,
            DiagnosticsResponse,
            ProviderCheckResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Reports", description = "Report card generation"),
        (name = "Diagnostics", description = "Template and data store checks"),
    ),
    info(
        title = "Report Card API",
        version = "0.1.0",
        description = "Generates student report cards as word documents from a template and the school's grade records",
    )
)]
pub struct ApiDoc;
