//! Grade records and the metrics derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::ids::StudentId;

/// One subject's final grade for a student in a term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    pub student_id: StudentId,
    pub term: String,
    #[serde(default)]
    pub subject: String,
    /// Final grade percentage, 0-100 by convention. Not range checked.
    #[serde(default)]
    pub percentage: Option<f64>,
}

impl GradeRecord {
    pub fn new(
        student_id: impl Into<StudentId>,
        term: impl Into<String>,
        subject: impl Into<String>,
        percentage: Option<f64>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            term: term.into(),
            subject: subject.into(),
            percentage,
        }
    }
}

/// Letter grade derived from an average score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PerformanceGrade {
    A,
    B,
    C,
    D,
    F,
}

impl PerformanceGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for PerformanceGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Totals computed over a student's grades for one term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetrics {
    pub total_marks: f64,
    pub average_score: f64,
    pub performance_grade: PerformanceGrade,
    /// Number of grade records the totals were computed from
    pub subject_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_record_missing_percentage() {
        let grade: GradeRecord =
            serde_json::from_str(r#"{"studentId": "S1", "term": "ONE", "subject": "Math"}"#)
                .unwrap();
        assert_eq!(grade.percentage, None);
    }

    #[test]
    fn test_performance_grade_display() {
        assert_eq!(PerformanceGrade::A.to_string(), "A");
        assert_eq!(PerformanceGrade::F.as_str(), "F");
    }
}
