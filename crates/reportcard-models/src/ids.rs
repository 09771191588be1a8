//! Strongly-typed identifiers.
//!
//! Student identifiers are opaque document ids assigned by the data store, so
//! the newtype wraps a `String` rather than a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Identifier of a student document.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "S1")]
pub struct StudentId(String);

impl StudentId {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// True for an empty or whitespace-only identifier.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentId({})", self.0)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StudentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_string() {
        let id = StudentId::new("S1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"S1\"");

        let parsed: StudentId = serde_json::from_str("\"S9\"").unwrap();
        assert_eq!(parsed.as_str(), "S9");
    }

    #[test]
    fn test_is_blank() {
        assert!(StudentId::new("  ").is_blank());
        assert!(!StudentId::new("S1").is_blank());
    }
}
