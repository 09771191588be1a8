//! Mapping between Firestore typed values and the domain records.
//!
//! Firestore's REST API wraps every field in a type tag
//! (`{"stringValue": "S.2"}`, `{"integerValue": "90"}`, ...). Documents are
//! first decoded into plain JSON, then mapped field by field into
//! [`StudentRecord`] and [`GradeRecord`].

use reportcard_models::{GradeRecord, StudentId, StudentRecord};
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// A document as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Document {
    /// Full resource name; the last segment is the document id.
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    pub(crate) fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// The fields as plain JSON.
    pub(crate) fn decoded(&self) -> Value {
        decode_fields(&self.fields)
    }
}

/// One element of a `:runQuery` response stream.
#[derive(Debug, Deserialize)]
pub(crate) struct RunQueryEntry {
    #[serde(default)]
    pub document: Option<Document>,
}

pub(crate) fn decode_fields(fields: &Map<String, Value>) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), decode_value(value)))
            .collect(),
    )
}

pub(crate) fn decode_value(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|tagged| tagged.iter().next()) else {
        return Value::Null;
    };

    match kind.as_str() {
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(Value::from)
            .unwrap_or_else(|| inner.clone()),
        "mapValue" => inner
            .get("fields")
            .and_then(Value::as_object)
            .map(decode_fields)
            .unwrap_or_else(|| Value::Object(Map::new())),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "nullValue" => Value::Null,
        _ => inner.clone(),
    }
}

pub(crate) fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

pub(crate) fn timestamp_value(value: &str) -> Value {
    json!({ "timestampValue": value })
}

/// Text of a scalar field. Numbers are printed, anything else is absent.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn student_from_document(document: &Document) -> StudentRecord {
    let fields = document.decoded();

    StudentRecord {
        id: StudentId::new(document.id()),
        full_name: fields.pointer("/personalInfo/fullName").and_then(text),
        stream: fields.get("class").and_then(text),
        admission_number: fields.get("admissionNumber").and_then(text),
        payment_code: fields.get("paymentCode").and_then(text),
        sex: fields.get("sex").and_then(text),
    }
}

pub(crate) fn grade_from_document(document: &Document) -> GradeRecord {
    let fields = document.decoded();
    let field = |name: &str| fields.get(name).and_then(text).unwrap_or_default();

    GradeRecord {
        student_id: StudentId::new(field("studentId")),
        term: field("term"),
        subject: field("subject"),
        percentage: fields
            .pointer("/finalGrade/percentage")
            .and_then(Value::as_f64),
    }
}

/// `studentId == student_id AND term == term` over the grades collection.
pub(crate) fn grades_query(collection: &str, student_id: &str, term: &str) -> Value {
    let equal = |field: &str, value: &str| {
        json!({
            "fieldFilter": {
                "field": { "fieldPath": field },
                "op": "EQUAL",
                "value": string_value(value),
            }
        })
    };

    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "compositeFilter": {
                    "op": "AND",
                    "filters": [equal("studentId", student_id), equal("term", term)],
                }
            }
        }
    })
}
