//! Single-report DTOs and the per-request report context.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request types that reject missing or empty fields with one fixed message.
pub trait RequiredFields {
    /// Wire names of the required fields, in the order they are reported.
    const REQUIRED: &'static [&'static str];

    fn missing_fields_message() -> String {
        format!("Missing required fields: {}", Self::REQUIRED.join(", "))
    }
}

/// Per-request labels printed on a report card. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Academic term identifier, e.g. "ONE"
    pub term: String,
    /// Class label supplied by the caller, e.g. "S.2"
    pub class_name: String,
    pub academic_year: String,
}

impl ReportContext {
    pub fn new(
        term: impl Into<String>,
        class_name: impl Into<String>,
        academic_year: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            class_name: class_name.into(),
            academic_year: academic_year.into(),
        }
    }

    /// True when both the term and the class label are present.
    pub fn is_complete(&self) -> bool {
        !self.term.trim().is_empty() && !self.class_name.trim().is_empty()
    }
}

/// Body of `POST /api/generate-word-report`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    #[validate(required, length(min = 1))]
    pub student_id: Option<String>,
    #[validate(required, length(min = 1))]
    pub term: Option<String>,
    #[validate(required, length(min = 1))]
    pub class_name: Option<String>,
}

impl RequiredFields for GenerateReportRequest {
    const REQUIRED: &'static [&'static str] = &["studentId", "term", "className"];
}

/// A generated document, base64 encoded for transport.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportDocument {
    /// Base64 encoded `.docx` bytes
    pub content: String,
    pub filename: String,
}

/// Response of `POST /api/generate-word-report`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateReportResponse {
    pub success: bool,
    pub message: String,
    pub data: ReportDocument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_validation() {
        let valid: GenerateReportRequest = serde_json::from_str(
            r#"{"studentId": "S1", "term": "ONE", "className": "S.2"}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());

        let missing: GenerateReportRequest =
            serde_json::from_str(r#"{"studentId": "S1", "term": "ONE"}"#).unwrap();
        assert!(missing.validate().is_err());

        let empty: GenerateReportRequest = serde_json::from_str(
            r#"{"studentId": "", "term": "ONE", "className": "S.2"}"#,
        )
        .unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_missing_fields_message() {
        assert_eq!(
            GenerateReportRequest::missing_fields_message(),
            "Missing required fields: studentId, term, className"
        );
    }

    #[test]
    fn test_context_completeness() {
        assert!(ReportContext::new("ONE", "S.2", "2025").is_complete());
        assert!(!ReportContext::new("", "S.2", "2025").is_complete());
        assert!(!ReportContext::new("ONE", "  ", "2025").is_complete());
    }
}
