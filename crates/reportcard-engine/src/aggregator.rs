//! Grade aggregation.

use reportcard_models::{AggregateMetrics, GradeRecord, PerformanceGrade};

/// Lower bound (inclusive) of each letter band, checked from the top down.
const GRADE_THRESHOLDS: [(f64, PerformanceGrade); 4] = [
    (80.0, PerformanceGrade::A),
    (70.0, PerformanceGrade::B),
    (60.0, PerformanceGrade::C),
    (50.0, PerformanceGrade::D),
];

pub struct GradeAggregator;

impl GradeAggregator {
    /// Total, average and letter grade over a student's grades for a term.
    ///
    /// A record without a percentage counts as 0. An empty slice yields an
    /// average of 0 (and therefore an `F`).
    pub fn aggregate(grades: &[GradeRecord]) -> AggregateMetrics {
        let total_marks: f64 = grades.iter().map(|g| g.percentage.unwrap_or(0.0)).sum();
        let average_score = if grades.is_empty() {
            0.0
        } else {
            total_marks / grades.len() as f64
        };

        AggregateMetrics {
            total_marks,
            average_score,
            performance_grade: Self::performance_grade(average_score),
            subject_count: grades.len(),
        }
    }

    pub fn performance_grade(average: f64) -> PerformanceGrade {
        GRADE_THRESHOLDS
            .iter()
            .find(|(lower, _)| average >= *lower)
            .map(|(_, grade)| *grade)
            .unwrap_or(PerformanceGrade::F)
    }
}
