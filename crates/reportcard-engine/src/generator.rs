//! Per-student report generation, shared by the single-report and batch paths.

use std::time::Duration;

use reportcard_core::ReportError;
use reportcard_models::{
    AggregateMetrics, GradeRecord, ReportContext, StudentId, StudentRecord,
};
use tracing::{debug, instrument};

use crate::aggregator::GradeAggregator;
use crate::placeholders::PlaceholderResolver;
use crate::provider::{DataProvider, fetch_with_timeout};
use crate::template::{TemplateEngine, TemplateStore};

/// A populated report card for one student.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub student_id: StudentId,
    pub filename: String,
    pub content: Vec<u8>,
    pub metrics: AggregateMetrics,
}

#[derive(Debug, Clone)]
pub struct ReportGenerator {
    templates: TemplateStore,
    resolver: PlaceholderResolver,
}

impl ReportGenerator {
    pub fn new(templates: TemplateStore, resolver: PlaceholderResolver) -> Self {
        Self {
            templates,
            resolver,
        }
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn resolver(&self) -> &PlaceholderResolver {
        &self.resolver
    }

    /// Document bytes for `student` from already fetched data.
    pub fn generate(
        &self,
        student: &StudentRecord,
        grades: &[GradeRecord],
        ctx: &ReportContext,
    ) -> Result<Vec<u8>, ReportError> {
        self.render(student, &GradeAggregator::aggregate(grades), ctx)
    }

    /// Fetches the student, then their grades for `ctx.term`, and generates
    /// the report. Grades are not fetched for an unknown student, and a blank
    /// id is not found without asking the provider.
    #[instrument(skip(self, provider, ctx), fields(term = %ctx.term))]
    pub async fn generate_for_student(
        &self,
        provider: &dyn DataProvider,
        student_id: &StudentId,
        ctx: &ReportContext,
        fetch_timeout: Duration,
    ) -> Result<GeneratedReport, ReportError> {
        // A blank id would address the collection itself rather than a document.
        if student_id.is_blank() {
            return Err(ReportError::NotFound);
        }

        let student = fetch_with_timeout(fetch_timeout, provider.fetch_student(student_id))
            .await?
            .ok_or(ReportError::NotFound)?;

        let grades =
            fetch_with_timeout(fetch_timeout, provider.fetch_grades(student_id, &ctx.term))
                .await?;

        let metrics = GradeAggregator::aggregate(&grades);
        debug!(
            subjects = metrics.subject_count,
            average = metrics.average_score,
            grade = %metrics.performance_grade,
            "Aggregated grades"
        );

        let content = self.render(&student, &metrics, ctx)?;

        Ok(GeneratedReport {
            student_id: student_id.clone(),
            filename: report_filename(&student, &ctx.term),
            content,
            metrics,
        })
    }

    fn render(
        &self,
        student: &StudentRecord,
        metrics: &AggregateMetrics,
        ctx: &ReportContext,
    ) -> Result<Vec<u8>, ReportError> {
        let template = self.templates.load()?;
        let placeholders = self.resolver.resolve(student, metrics, ctx);
        TemplateEngine::populate(&template, &placeholders)
    }
}

/// `Report_Card_<full name or "Unknown">_<term>.docx`
pub fn report_filename(student: &StudentRecord, term: &str) -> String {
    format!("Report_Card_{}_{}.docx", student.display_name(), term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::InMemoryProvider;
    use crate::template::Template;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::FileOptions;

    fn template() -> Template {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", FileOptions::default())
            .unwrap();
        writer
            .write_all(
                br#"<w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:t>{StudentName} {TotalMarks} {AverageScore} {OverallPerformance}</w:t></w:r></w:p></w:body></w:document>"#,
            )
            .unwrap();
        Template::from_bytes(&writer.finish().unwrap().into_inner()).unwrap()
    }

    fn generator() -> ReportGenerator {
        ReportGenerator::new(
            TemplateStore::in_memory(template()),
            PlaceholderResolver::default(),
        )
    }

    fn provider() -> InMemoryProvider {
        InMemoryProvider::new(
            vec![
                StudentRecord::new("S1").with_full_name("Okello Peter"),
                StudentRecord::new("S2"),
            ],
            vec![
                GradeRecord::new("S1", "ONE", "Math", Some(90.0)),
                GradeRecord::new("S1", "ONE", "Eng", Some(70.0)),
            ],
        )
    }

    fn ctx() -> ReportContext {
        ReportContext::new("ONE", "S.2", "2025")
    }

    fn text_of(bytes: &[u8]) -> String {
        Template::from_bytes(bytes).unwrap().unit_texts().join("\n")
    }

    #[tokio::test]
    async fn test_generate_for_existing_student() {
        let report = generator()
            .generate_for_student(&provider(), &"S1".into(), &ctx(), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(report.filename, "Report_Card_Okello Peter_ONE.docx");
        assert_eq!(report.metrics.total_marks, 160.0);
        assert_eq!(text_of(&report.content), "Okello Peter 160 80.0 A");
    }

    #[tokio::test]
    async fn test_student_without_grades() {
        let report = generator()
            .generate_for_student(&provider(), &"S2".into(), &ctx(), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(report.filename, "Report_Card_Unknown_ONE.docx");
        assert_eq!(text_of(&report.content), " 0 0.0 F");
    }

    #[tokio::test]
    async fn test_unknown_student_is_not_found() {
        let err = generator()
            .generate_for_student(&provider(), &"S9".into(), &ctx(), Duration::from_secs(1))
            .await
            .unwrap_err();

        assert_eq!(err, ReportError::NotFound);
    }

    #[tokio::test]
    async fn test_blank_id_is_not_found_without_lookup() {
        let provider = InMemoryProvider::new(vec![StudentRecord::new("  ")], vec![]);

        for id in ["", "  "] {
            let err = generator()
                .generate_for_student(&provider, &id.into(), &ctx(), Duration::from_secs(1))
                .await
                .unwrap_err();
            assert_eq!(err, ReportError::NotFound);
        }
    }

    #[tokio::test]
    async fn test_single_and_fetched_paths_match() {
        let provider = provider();
        let fetched = generator()
            .generate_for_student(&provider, &"S1".into(), &ctx(), Duration::from_secs(1))
            .await
            .unwrap();

        let student = StudentRecord::new("S1").with_full_name("Okello Peter");
        let grades = [
            GradeRecord::new("S1", "ONE", "Math", Some(90.0)),
            GradeRecord::new("S1", "ONE", "Eng", Some(70.0)),
        ];
        let direct = generator().generate(&student, &grades, &ctx()).unwrap();

        assert_eq!(fetched.content, direct);
    }

    #[test]
    fn test_missing_template_is_load_error() {
        let generator = ReportGenerator::new(
            TemplateStore::Disk("/nonexistent/report_template.docx".into()),
            PlaceholderResolver::default(),
        );

        let err = generator
            .generate(&StudentRecord::new("S1"), &[], &ctx())
            .unwrap_err();
        assert!(matches!(err, ReportError::TemplateLoad(_)));
    }
}
