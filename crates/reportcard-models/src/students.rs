//! Student records.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::StudentId;

/// A student as needed by the report card.
///
/// Only the identifier is required. Every other field may be absent in the
/// data store; report generation renders an absent field as an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: StudentId,
    /// Full name (`personalInfo.fullName` in the student document)
    #[serde(default)]
    pub full_name: Option<String>,
    /// Class/stream label stored on the student (e.g. "S.2 East")
    #[serde(default, alias = "class")]
    pub stream: Option<String>,
    /// Admission number (printed as the LIN)
    #[serde(default)]
    pub admission_number: Option<String>,
    /// School fees payment code
    #[serde(default)]
    pub payment_code: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
}

impl StudentRecord {
    pub fn new(id: impl Into<StudentId>) -> Self {
        Self {
            id: id.into(),
            full_name: None,
            stream: None,
            admission_number: None,
            payment_code: None,
            sex: None,
        }
    }

    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = Some(stream.into());
        self
    }

    pub fn with_admission_number(mut self, number: impl Into<String>) -> Self {
        self.admission_number = Some(number.into());
        self
    }

    pub fn with_payment_code(mut self, code: impl Into<String>) -> Self {
        self.payment_code = Some(code.into());
        self
    }

    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    /// The full name, or `"Unknown"` when it was not recorded.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let student: StudentRecord = serde_json::from_str(r#"{"id": "S1"}"#).unwrap();
        assert_eq!(student, StudentRecord::new("S1"));
        assert_eq!(student.display_name(), "Unknown");
    }

    #[test]
    fn test_class_alias_maps_to_stream() {
        let student: StudentRecord =
            serde_json::from_str(r#"{"id": "S1", "fullName": "Okello Peter", "class": "S.2 East"}"#)
                .unwrap();
        assert_eq!(student.stream.as_deref(), Some("S.2 East"));
        assert_eq!(student.display_name(), "Okello Peter");
    }
}
