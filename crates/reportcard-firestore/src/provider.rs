use chrono::{SecondsFormat, Utc};
use reportcard_config::FirestoreConfig;
use reportcard_core::ReportError;
use reportcard_engine::provider::{DataProvider, ProviderFuture};
use reportcard_models::{GradeRecord, StudentId, StudentRecord};
use reqwest::{Client, StatusCode, Url};
use serde_json::json;
use tracing::debug;

use crate::values::{
    Document, RunQueryEntry, grade_from_document, grades_query, string_value,
    student_from_document, timestamp_value,
};

const CONNECTION_TEST_PATH: [&str; 2] = ["test", "connection"];

/// Firestore REST client.
#[derive(Clone)]
pub struct FirestoreProvider {
    client: Client,
    config: FirestoreConfig,
    name: String,
}

impl FirestoreProvider {
    pub fn new(config: FirestoreConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: FirestoreConfig) -> Self {
        let name = format!("firestore:{}", config.project_id);
        Self {
            client,
            config,
            name,
        }
    }

    /// URL of the document at `segments` under the documents root. Each
    /// segment is percent-encoded, so an id can never escape its path segment.
    fn document_url(&self, segments: &[&str]) -> Result<Url, ReportError> {
        let mut url = self.documents_root()?;
        url.path_segments_mut()
            .map_err(|_| ReportError::data_fetch("Firestore base URL cannot hold a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(self.with_key(url))
    }

    fn run_query_url(&self) -> Result<Url, ReportError> {
        let url = Url::parse(&format!("{}:runQuery", self.config.documents_url()))
            .map_err(|e| ReportError::data_fetch(format!("invalid Firestore URL: {e}")))?;
        Ok(self.with_key(url))
    }

    fn documents_root(&self) -> Result<Url, ReportError> {
        Url::parse(&self.config.documents_url())
            .map_err(|e| ReportError::data_fetch(format!("invalid Firestore URL: {e}")))
    }

    fn with_key(&self, mut url: Url) -> Url {
        if !self.config.api_key.is_empty() {
            url.query_pairs_mut().append_pair("key", &self.config.api_key);
        }
        url
    }

    /// Reads one document; `None` when it does not exist.
    async fn get_document(&self, segments: &[&str]) -> Result<Option<Document>, ReportError> {
        let response = self
            .client
            .get(self.document_url(segments)?)
            .send()
            .await
            .map_err(fetch_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document = response
            .error_for_status()
            .map_err(fetch_error)?
            .json::<Document>()
            .await
            .map_err(fetch_error)?;
        Ok(Some(document))
    }
}

/// Drops the request URL from the error so the API key never reaches logs or
/// response bodies.
fn fetch_error(err: reqwest::Error) -> ReportError {
    ReportError::data_fetch(err.without_url())
}

impl DataProvider for FirestoreProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_student<'a>(&'a self, id: &'a StudentId) -> ProviderFuture<'a, Option<StudentRecord>> {
        Box::pin(async move {
            let document = self
                .get_document(&[self.config.students_collection.as_str(), id.as_str()])
                .await?;
            debug!(student_id = %id, found = document.is_some(), "Fetched student document");
            Ok(document.as_ref().map(student_from_document))
        })
    }

    fn fetch_grades<'a>(
        &'a self,
        id: &'a StudentId,
        term: &'a str,
    ) -> ProviderFuture<'a, Vec<GradeRecord>> {
        Box::pin(async move {
            let query = grades_query(&self.config.grades_collection, id.as_str(), term);

            let entries = self
                .client
                .post(self.run_query_url()?)
                .json(&query)
                .send()
                .await
                .map_err(fetch_error)?
                .error_for_status()
                .map_err(fetch_error)?
                .json::<Vec<RunQueryEntry>>()
                .await
                .map_err(fetch_error)?;

            let grades: Vec<GradeRecord> = entries
                .iter()
                .filter_map(|entry| entry.document.as_ref())
                .map(grade_from_document)
                .collect();
            debug!(student_id = %id, term, count = grades.len(), "Fetched grades");
            Ok(grades)
        })
    }

    /// Writes `test/connection` and reads it back.
    fn ping<'a>(&'a self) -> ProviderFuture<'a, ()> {
        Box::pin(async move {
            let body = json!({
                "fields": {
                    "message": string_value("Firebase connection test"),
                    "timestamp": timestamp_value(
                        &Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
                    ),
                    "project_id": string_value(&self.config.project_id),
                }
            });

            self.client
                .patch(self.document_url(&CONNECTION_TEST_PATH)?)
                .json(&body)
                .send()
                .await
                .map_err(fetch_error)?
                .error_for_status()
                .map_err(fetch_error)?;
            debug!(project = %self.config.project_id, "Connection test document written");

            match self.get_document(&CONNECTION_TEST_PATH).await? {
                Some(_) => Ok(()),
                None => Err(ReportError::data_fetch(
                    "connection test document not found",
                )),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode as HttpStatus;
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::Value;

    const DOCUMENTS: &str = "/projects/test-project/databases/(default)/documents";

    async fn student(Path(id): Path<String>) -> impl IntoResponse {
        if id != "S1" {
            return (HttpStatus::NOT_FOUND, Json(json!({ "error": { "code": 404 } })));
        }
        (
            HttpStatus::OK,
            Json(json!({
                "name": format!("projects/test-project/databases/(default)/documents/students/{id}"),
                "fields": {
                    "personalInfo": { "mapValue": { "fields": {
                        "fullName": { "stringValue": "Okello Peter" }
                    }}},
                    "class": { "stringValue": "S.2 East" }
                }
            })),
        )
    }

    async fn run_query(Json(query): Json<Value>) -> Json<Value> {
        let filters = &query["structuredQuery"]["where"]["compositeFilter"]["filters"];
        let term = filters[1]["fieldFilter"]["value"]["stringValue"].clone();
        Json(json!([
            { "readTime": "2025-01-01T00:00:00Z" },
            { "document": {
                "name": "projects/test-project/databases/(default)/documents/grades/g1",
                "fields": {
                    "studentId": { "stringValue": "S1" },
                    "term": { "stringValue": term },
                    "subject": { "stringValue": "Math" },
                    "finalGrade": { "mapValue": { "fields": { "percentage": { "doubleValue": 90.5 } } } }
                }
            }}
        ]))
    }

    async fn serve(router: Router) -> FirestoreProvider {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        FirestoreProvider::new(FirestoreConfig {
            project_id: "test-project".to_string(),
            base_url: format!("http://{addr}"),
            ..FirestoreConfig::default()
        })
    }

    fn fake_firestore() -> Router {
        Router::new()
            .route(&format!("{DOCUMENTS}/students/{{id}}"), get(student))
            .route(&format!("{DOCUMENTS}:runQuery"), post(run_query))
    }

    #[tokio::test]
    async fn test_fetch_student_maps_document() {
        let provider = serve(fake_firestore()).await;

        let student = provider.fetch_student(&"S1".into()).await.unwrap().unwrap();
        assert_eq!(student.id.as_str(), "S1");
        assert_eq!(student.full_name.as_deref(), Some("Okello Peter"));
        assert_eq!(student.stream.as_deref(), Some("S.2 East"));
    }

    #[tokio::test]
    async fn test_missing_student_is_none() {
        let provider = serve(fake_firestore()).await;
        assert!(provider.fetch_student(&"S9".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_grades_skips_entries_without_document() {
        let provider = serve(fake_firestore()).await;

        let grades = provider.fetch_grades(&"S1".into(), "ONE").await.unwrap();
        assert_eq!(grades, vec![GradeRecord::new("S1", "ONE", "Math", Some(90.5))]);
    }

    #[tokio::test]
    async fn test_server_error_is_data_fetch() {
        let router = Router::new().route(
            &format!("{DOCUMENTS}:runQuery"),
            post(|| async { HttpStatus::FORBIDDEN }),
        );
        let provider = serve(router).await;

        let err = provider.fetch_grades(&"S1".into(), "ONE").await.unwrap_err();
        assert!(matches!(err, ReportError::DataFetch(_)));
    }

    #[test]
    fn test_api_key_is_appended() {
        let provider = FirestoreProvider::new(FirestoreConfig {
            api_key: "k3y".to_string(),
            ..FirestoreConfig::default()
        });

        assert_eq!(provider.name(), "firestore:ass-sms");
        assert_eq!(
            provider.run_query_url().unwrap().as_str(),
            "https://firestore.googleapis.com/v1/projects/ass-sms/databases/(default)/documents:runQuery?key=k3y"
        );
        assert_eq!(
            provider.document_url(&["students", "S1"]).unwrap().as_str(),
            "https://firestore.googleapis.com/v1/projects/ass-sms/databases/(default)/documents/students/S1?key=k3y"
        );
    }

    #[test]
    fn test_document_id_is_one_encoded_segment() {
        let provider = FirestoreProvider::new(FirestoreConfig {
            api_key: "k3y".to_string(),
            ..FirestoreConfig::default()
        });

        let url = provider.document_url(&["students", "S1?x=1#frag/../S2"]).unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), Some("key=k3y"));
        assert!(url.path().ends_with("/documents/students/S1%3Fx=1%23frag%2F..%2FS2"));
    }

    #[tokio::test]
    async fn test_ids_with_url_delimiters_do_not_match_other_students() {
        let provider = serve(fake_firestore()).await;

        for id in ["S1?x=1", "S1#frag", "S1/extra", "../students/S1"] {
            let student = provider.fetch_student(&id.into()).await.unwrap();
            assert!(student.is_none(), "{id} resolved to a student");
        }
    }
}
