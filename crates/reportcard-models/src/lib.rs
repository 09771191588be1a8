//! # Report Card Models
//!
//! Domain records and DTOs for the report card service.
//!
//! The domain records ([`students::StudentRecord`], [`grades::GradeRecord`]) are
//! the typed shape every data provider maps its raw documents into. The DTOs
//! mirror the JSON contract of the HTTP API.
//!
//! # Modules
//!
//! - [`ids`]: strongly-typed identifiers
//! - [`students`]: student records
//! - [`grades`]: grade records, aggregate metrics and performance grades
//! - [`reports`]: report context and single-report request/response DTOs
//! - [`batch`]: batch outcomes, summary and batch request/response DTOs
//! - [`health`]: health and diagnostic responses

pub mod batch;
pub mod grades;
pub mod health;
pub mod ids;
pub mod reports;
pub mod students;

// Re-export commonly used types at crate root for convenience
pub use batch::{BatchGenerateRequest, BatchGenerateResponse, BatchOutcome, BatchResult, BatchSummary};
pub use grades::{AggregateMetrics, GradeRecord, PerformanceGrade};
pub use health::{DiagnosticsResponse, HealthResponse, ProviderCheckResponse};
pub use ids::StudentId;
pub use reports::{
    GenerateReportRequest, GenerateReportResponse, ReportContext, ReportDocument, RequiredFields,
};
pub use students::StudentRecord;
