//! Batch generation outcomes and DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::StudentId;
use crate::reports::RequiredFields;

pub const SUCCESS_MESSAGE: &str = "Report card generated successfully";

/// Result of one student's generation attempt within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub student_id: StudentId,
    pub success: bool,
    pub message: String,
}

impl BatchOutcome {
    pub fn succeeded(student_id: StudentId) -> Self {
        Self {
            student_id,
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failed(student_id: StudentId, message: impl Into<String>) -> Self {
        Self {
            student_id,
            success: false,
            message: message.into(),
        }
    }
}

/// Counts over a batch's outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Outcomes of a batch, one per requested identifier, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchResult {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchResult {
    pub fn new(outcomes: Vec<BatchOutcome>) -> Self {
        Self { outcomes }
    }

    /// Number of students attempted.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn summary(&self) -> BatchSummary {
        let succeeded = self.outcomes.iter().filter(|o| o.success).count();
        BatchSummary {
            total: self.outcomes.len(),
            succeeded,
            failed: self.outcomes.len() - succeeded,
        }
    }
}

/// Body of `POST /api/batch-generate`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BatchGenerateRequest {
    #[validate(required, length(min = 1))]
    pub students: Option<Vec<String>>,
    #[validate(required, length(min = 1))]
    pub term: Option<String>,
    #[validate(required, length(min = 1))]
    pub class: Option<String>,
}

impl RequiredFields for BatchGenerateRequest {
    const REQUIRED: &'static [&'static str] = &["students", "term", "class"];
}

/// Response of `POST /api/batch-generate`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchGenerateResponse {
    pub success: bool,
    pub message: String,
    pub results: Vec<BatchOutcome>,
    pub summary: BatchSummary,
}

impl BatchGenerateResponse {
    pub fn from_result(result: BatchResult) -> Self {
        let summary = result.summary();
        Self {
            success: true,
            message: format!(
                "Batch processing completed for {} students",
                summary.total
            ),
            results: result.outcomes,
            summary,
        }
    }
}
