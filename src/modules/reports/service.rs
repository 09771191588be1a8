use std::time::Instant;

use data_encoding::BASE64;
use reportcard_core::{AppError, ReportError};
use reportcard_engine::BatchOrchestrator;
use reportcard_models::{
    BatchGenerateRequest, BatchGenerateResponse, GenerateReportRequest, GenerateReportResponse,
    ReportContext, ReportDocument, StudentId,
};
use tracing::{info, instrument};

use crate::metrics::{track_batch_run, track_report_duration, track_report_generated};
use crate::state::AppState;

pub const GENERATED_MESSAGE: &str = "Word document generated successfully";

pub struct ReportService;

impl ReportService {
    /// Generates one student's report card and encodes it for the response.
    #[instrument(skip(state, request), fields(student_id = ?request.student_id, term = ?request.term))]
    pub async fn generate_report(
        state: &AppState,
        request: GenerateReportRequest,
    ) -> Result<GenerateReportResponse, AppError> {
        let student_id = StudentId::from(request.student_id.unwrap_or_default());
        let ctx = Self::context(
            state,
            request.term.unwrap_or_default(),
            request.class_name.unwrap_or_default(),
        );

        let start = Instant::now();
        let result = state
            .generator
            .generate_for_student(
                state.provider.as_ref(),
                &student_id,
                &ctx,
                state.batch_config.fetch_timeout,
            )
            .await;
        track_report_duration("single", start.elapsed().as_secs_f64());

        let report = match result {
            Ok(report) => {
                track_report_generated("single", "success");
                report
            }
            Err(err) => {
                track_report_generated("single", failure_kind(&err));
                return Err(err.into());
            }
        };

        info!(
            filename = %report.filename,
            bytes = report.content.len(),
            "Report card generated"
        );

        Ok(GenerateReportResponse {
            success: true,
            message: GENERATED_MESSAGE.to_string(),
            data: ReportDocument {
                content: BASE64.encode(&report.content),
                filename: report.filename,
            },
        })
    }

    /// Generates report cards for every listed student. Per-student failures
    /// are reported as outcomes, never as an error.
    #[instrument(skip(state, request), fields(term = ?request.term, class = ?request.class))]
    pub async fn batch_generate(
        state: &AppState,
        request: BatchGenerateRequest,
    ) -> Result<BatchGenerateResponse, AppError> {
        let student_ids: Vec<StudentId> = request
            .students
            .unwrap_or_default()
            .into_iter()
            .map(StudentId::from)
            .collect();
        let ctx = Self::context(
            state,
            request.term.unwrap_or_default(),
            request.class.unwrap_or_default(),
        );

        let orchestrator =
            BatchOrchestrator::new(state.generator.clone(), state.batch_config.clone());
        let result = orchestrator
            .run_batch(&student_ids, &ctx, state.provider.as_ref())
            .await?;

        track_batch_run(&result.summary());

        Ok(BatchGenerateResponse::from_result(result))
    }

    fn context(state: &AppState, term: String, class_name: String) -> ReportContext {
        ReportContext::new(term, class_name, state.school.academic_year.clone())
    }
}

/// Metric label for a failed generation.
fn failure_kind(err: &ReportError) -> &'static str {
    match err {
        ReportError::NotFound => "not_found",
        ReportError::Validation(_) => "invalid",
        ReportError::TemplateLoad(_) | ReportError::TemplateRender(_) => "template_error",
        ReportError::DataFetch(_) => "fetch_error",
    }
}
