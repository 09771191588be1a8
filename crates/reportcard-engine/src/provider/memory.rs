use std::collections::HashMap;
use std::path::Path;

use reportcard_core::ReportError;
use reportcard_models::{GradeRecord, StudentId, StudentRecord};
use serde::Deserialize;

use super::{DataProvider, ProviderFuture};

/// Provider over records held in memory, loadable from a JSON fixture of the
/// form `{"students": [...], "grades": [...]}`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    students: HashMap<StudentId, StudentRecord>,
    grades: Vec<GradeRecord>,
}

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    students: Vec<StudentRecord>,
    #[serde(default)]
    grades: Vec<GradeRecord>,
}

impl InMemoryProvider {
    pub fn new(students: Vec<StudentRecord>, grades: Vec<GradeRecord>) -> Self {
        Self {
            students: students
                .into_iter()
                .map(|student| (student.id.clone(), student))
                .collect(),
            grades,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let fixture: Fixture = serde_json::from_str(json)
            .map_err(|e| ReportError::data_fetch(format!("invalid fixture: {e}")))?;
        Ok(Self::new(fixture.students, fixture.grades))
    }

    pub fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ReportError::data_fetch(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}

impl DataProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn fetch_student<'a>(&'a self, id: &'a StudentId) -> ProviderFuture<'a, Option<StudentRecord>> {
        Box::pin(async move { Ok(self.students.get(id).cloned()) })
    }

    fn fetch_grades<'a>(
        &'a self,
        id: &'a StudentId,
        term: &'a str,
    ) -> ProviderFuture<'a, Vec<GradeRecord>> {
        Box::pin(async move {
            Ok(self
                .grades
                .iter()
                .filter(|grade| &grade.student_id == id && grade.term == term)
                .cloned()
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "students": [
            {"id": "S1", "fullName": "Okello Peter", "class": "S.2 East", "admissionNumber": "ADM-001"}
        ],
        "grades": [
            {"studentId": "S1", "term": "ONE", "subject": "Math", "percentage": 90},
            {"studentId": "S1", "term": "TWO", "subject": "Math", "percentage": 40},
            {"studentId": "S1", "term": "ONE", "subject": "Eng", "percentage": 70}
        ]
    }"#;

    #[tokio::test]
    async fn test_fetch_student_from_fixture() {
        let provider = InMemoryProvider::from_json(FIXTURE).unwrap();

        let student = provider.fetch_student(&"S1".into()).await.unwrap().unwrap();
        assert_eq!(student.full_name.as_deref(), Some("Okello Peter"));
        assert_eq!(student.stream.as_deref(), Some("S.2 East"));

        assert!(provider.fetch_student(&"S9".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_grades_filters_by_term() {
        let provider = InMemoryProvider::from_json(FIXTURE).unwrap();

        let grades = provider.fetch_grades(&"S1".into(), "ONE").await.unwrap();
        let subjects: Vec<&str> = grades.iter().map(|g| g.subject.as_str()).collect();
        assert_eq!(subjects, ["Math", "Eng"]);

        assert!(provider.fetch_grades(&"S1".into(), "THREE").await.unwrap().is_empty());
    }

    #[test]
    fn test_invalid_fixture() {
        let err = InMemoryProvider::from_json("{\"students\": 3}").unwrap_err();
        assert!(matches!(err, ReportError::DataFetch(_)));
    }
}
