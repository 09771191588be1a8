//! Placeholder resolution: student, term and metrics to template values.

use std::collections::BTreeMap;

use reportcard_config::SchoolProfile;
use reportcard_models::{AggregateMetrics, ReportContext, StudentRecord};

pub const SCHOOL_NAME: &str = "{SchoolName}";
pub const SCHOOL_ADDRESS: &str = "{SchoolAddress}";
pub const SCHOOL_PHONE: &str = "{SchoolPhone}";
pub const REPORT_TITLE: &str = "{ReportTitle}";
pub const TERM: &str = "{Term}";
pub const YEAR: &str = "{Year}";
pub const STUDENT_NAME: &str = "{StudentName}";
pub const STUDENT_CLASS: &str = "{StudentClass}";
pub const STUDENT_STREAM: &str = "{StudentStream}";
pub const STUDENT_LIN: &str = "{StudentLIN}";
pub const PAYMENT_CODE: &str = "{PaymentCode}";
pub const STUDENT_SEX: &str = "{StudentSex}";
pub const TOTAL_MARKS: &str = "{TotalMarks}";
pub const AVERAGE_SCORE: &str = "{AverageScore}";
pub const OVERALL_PERFORMANCE: &str = "{OverallPerformance}";

/// Every key [`PlaceholderResolver::resolve`] produces.
pub const KNOWN_PLACEHOLDERS: [&str; 15] = [
    SCHOOL_NAME,
    SCHOOL_ADDRESS,
    SCHOOL_PHONE,
    REPORT_TITLE,
    TERM,
    YEAR,
    STUDENT_NAME,
    STUDENT_CLASS,
    STUDENT_STREAM,
    STUDENT_LIN,
    PAYMENT_CODE,
    STUDENT_SEX,
    TOTAL_MARKS,
    AVERAGE_SCORE,
    OVERALL_PERFORMANCE,
];

/// Placeholder token to replacement value, built fresh for every report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    values: BTreeMap<String, String>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replaces every occurrence of every key in `text` in a single left to
    /// right pass, so replacement values are never rescanned.
    ///
    /// Returns `None` when `text` contains no key at all.
    pub fn substitute(&self, text: &str) -> Option<String> {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        let mut replaced = false;

        loop {
            // Earliest match wins; on a tie the longer key wins.
            let next = self
                .values
                .iter()
                .filter(|(key, _)| !key.is_empty())
                .filter_map(|(key, value)| rest.find(key.as_str()).map(|at| (at, key, value)))
                .min_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())));

            match next {
                Some((at, key, value)) => {
                    out.push_str(&rest[..at]);
                    out.push_str(value);
                    rest = &rest[at + key.len()..];
                    replaced = true;
                }
                None => {
                    out.push_str(rest);
                    break;
                }
            }
        }

        replaced.then_some(out)
    }
}

impl<K, V> FromIterator<(K, V)> for PlaceholderMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Builds the placeholder map of one report card.
#[derive(Debug, Clone)]
pub struct PlaceholderResolver {
    school: SchoolProfile,
}

impl PlaceholderResolver {
    pub fn new(school: SchoolProfile) -> Self {
        Self { school }
    }

    pub fn school(&self) -> &SchoolProfile {
        &self.school
    }

    pub fn resolve(
        &self,
        student: &StudentRecord,
        metrics: &AggregateMetrics,
        ctx: &ReportContext,
    ) -> PlaceholderMap {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();

        [
            (SCHOOL_NAME, self.school.name.clone()),
            (SCHOOL_ADDRESS, self.school.address.clone()),
            (SCHOOL_PHONE, self.school.phone.clone()),
            (REPORT_TITLE, report_title(&ctx.term, &ctx.academic_year)),
            (TERM, ctx.term.clone()),
            (YEAR, ctx.academic_year.clone()),
            (STUDENT_NAME, field(&student.full_name)),
            (STUDENT_CLASS, ctx.class_name.clone()),
            (STUDENT_STREAM, field(&student.stream)),
            (STUDENT_LIN, field(&student.admission_number)),
            (PAYMENT_CODE, field(&student.payment_code)),
            (STUDENT_SEX, field(&student.sex)),
            (TOTAL_MARKS, format_total(metrics.total_marks)),
            (AVERAGE_SCORE, format!("{:.1}", metrics.average_score)),
            (
                OVERALL_PERFORMANCE,
                metrics.performance_grade.as_str().to_string(),
            ),
        ]
        .into_iter()
        .collect()
    }
}

impl Default for PlaceholderResolver {
    fn default() -> Self {
        Self::new(SchoolProfile::default())
    }
}

pub fn report_title(term: &str, academic_year: &str) -> String {
    format!(
        "END OF TERM {} ASSESSMENT REPORT CARD {}",
        term.to_uppercase(),
        academic_year
    )
}

/// Total marks as an integer-valued string, rounded half away from zero.
fn format_total(total: f64) -> String {
    if total.is_finite() {
        format!("{}", total.round() as i64)
    } else {
        "0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::GradeAggregator;
    use reportcard_models::GradeRecord;

    fn context() -> ReportContext {
        ReportContext::new("one", "S.2", "2025")
    }

    fn student() -> StudentRecord {
        StudentRecord::new("S1")
            .with_full_name("Akello Grace")
            .with_stream("S.2 East")
            .with_admission_number("U0001/2020")
            .with_payment_code("1002003")
            .with_sex("F")
    }

    #[test]
    fn test_resolves_every_known_key() {
        let metrics = GradeAggregator::aggregate(&[]);
        let map = PlaceholderResolver::default().resolve(&student(), &metrics, &context());

        assert_eq!(map.len(), KNOWN_PLACEHOLDERS.len());
        for key in KNOWN_PLACEHOLDERS {
            assert!(map.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_student_fields_and_title() {
        let metrics = GradeAggregator::aggregate(&[
            GradeRecord::new("S1", "one", "Math", Some(90.0)),
            GradeRecord::new("S1", "one", "Eng", Some(70.0)),
        ]);
        let map = PlaceholderResolver::default().resolve(&student(), &metrics, &context());

        assert_eq!(map.get(STUDENT_NAME), Some("Akello Grace"));
        assert_eq!(map.get(STUDENT_CLASS), Some("S.2"));
        assert_eq!(map.get(STUDENT_STREAM), Some("S.2 East"));
        assert_eq!(map.get(STUDENT_LIN), Some("U0001/2020"));
        assert_eq!(map.get(TERM), Some("one"));
        assert_eq!(
            map.get(REPORT_TITLE),
            Some("END OF TERM ONE ASSESSMENT REPORT CARD 2025")
        );
        assert_eq!(map.get(TOTAL_MARKS), Some("160"));
        assert_eq!(map.get(AVERAGE_SCORE), Some("80.0"));
        assert_eq!(map.get(OVERALL_PERFORMANCE), Some("A"));
        assert_eq!(map.get(SCHOOL_NAME), Some("ADILANG SECONDARY SCHOOL"));
    }

    #[test]
    fn test_missing_student_fields_become_empty() {
        let metrics = GradeAggregator::aggregate(&[]);
        let map =
            PlaceholderResolver::default().resolve(&StudentRecord::new("S2"), &metrics, &context());

        assert_eq!(map.get(STUDENT_NAME), Some(""));
        assert_eq!(map.get(PAYMENT_CODE), Some(""));
        assert_eq!(map.get(TOTAL_MARKS), Some("0"));
        assert_eq!(map.get(AVERAGE_SCORE), Some("0.0"));
        assert_eq!(map.get(OVERALL_PERFORMANCE), Some("F"));
    }

    #[test]
    fn test_average_has_one_decimal() {
        let metrics = GradeAggregator::aggregate(&[
            GradeRecord::new("S1", "one", "Math", Some(66.0)),
            GradeRecord::new("S1", "one", "Eng", Some(67.0)),
            GradeRecord::new("S1", "one", "Bio", Some(67.0)),
        ]);
        let map = PlaceholderResolver::default().resolve(&student(), &metrics, &context());

        assert_eq!(map.get(AVERAGE_SCORE), Some("66.7"));
        assert_eq!(map.get(TOTAL_MARKS), Some("200"));
    }

    #[test]
    fn test_substitute_replaces_all_occurrences() {
        let map: PlaceholderMap = [("{A}", "1"), ("{B}", "2")].into_iter().collect();

        assert_eq!(
            map.substitute("{A} and {B} and {A}").as_deref(),
            Some("1 and 2 and 1")
        );
        assert_eq!(map.substitute("no tokens here"), None);
    }

    #[test]
    fn test_substitute_leaves_unknown_tokens() {
        let map: PlaceholderMap = [("{A}", "1")].into_iter().collect();

        assert_eq!(
            map.substitute("{A} {Unknown}").as_deref(),
            Some("1 {Unknown}")
        );
    }

    #[test]
    fn test_substitute_does_not_rescan_values() {
        let map: PlaceholderMap = [("{StudentName}", "{Term}"), ("{Term}", "ONE")]
            .into_iter()
            .collect();

        assert_eq!(
            map.substitute("{StudentName} / {Term}").as_deref(),
            Some("{Term} / ONE")
        );
    }
}
