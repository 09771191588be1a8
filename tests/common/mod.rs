#![allow(dead_code)]

use std::io::{Cursor, Read, Write};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use reportcard::router::init_router;
use reportcard::state::AppState;
use reportcard_config::{BatchConfig, CorsConfig, SchoolProfile};
use reportcard_core::ReportError;
use reportcard_engine::{
    DataProvider, InMemoryProvider, ProviderFuture, Template, TemplateStore,
};
use reportcard_models::{GradeRecord, StudentId, StudentRecord};
use tower::ServiceExt;

/// `word/document.xml` with a paragraph per placeholder line and one table.
pub fn document_xml() -> String {
    let paragraph = |text: &str| format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}{}{}<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Name: {{StudentName}}</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Class: {{StudentClass}}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>{}{}<w:sectPr/></w:body></w:document>"#,
        paragraph("{SchoolName}"),
        paragraph("{ReportTitle}"),
        paragraph("Term {Term} of {Year}"),
        paragraph("Total {TotalMarks} Average {AverageScore}"),
        paragraph("Overall {OverallPerformance} {UnknownToken}"),
    )
}

/// A minimal word package around [`document_xml`].
pub fn template_docx() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer
        .write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document_xml().as_bytes()).unwrap();

    writer.finish().unwrap().into_inner()
}

/// `word/document.xml` of a generated package.
pub fn read_document_xml(docx: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut file = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

/// S1 with two grades for term ONE, S2 without grades, no S9.
pub fn fixture_provider() -> InMemoryProvider {
    InMemoryProvider::new(
        vec![
            StudentRecord::new("S1")
                .with_full_name("Okello Peter")
                .with_stream("S.2 East")
                .with_admission_number("LIN001")
                .with_sex("M"),
            StudentRecord::new("S2").with_full_name("Akello Grace"),
        ],
        vec![
            GradeRecord::new("S1", "ONE", "Math", Some(90.0)),
            GradeRecord::new("S1", "ONE", "Eng", Some(70.0)),
            GradeRecord::new("S1", "TWO", "Math", Some(10.0)),
        ],
    )
}

/// Provider whose every call fails at the transport level.
pub struct UnreachableProvider;

impl DataProvider for UnreachableProvider {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn fetch_student<'a>(&'a self, _id: &'a StudentId) -> ProviderFuture<'a, Option<StudentRecord>> {
        Box::pin(async { Err(ReportError::data_fetch("connection refused")) })
    }

    fn fetch_grades<'a>(
        &'a self,
        _id: &'a StudentId,
        _term: &'a str,
    ) -> ProviderFuture<'a, Vec<GradeRecord>> {
        Box::pin(async { Err(ReportError::data_fetch("connection refused")) })
    }

    fn ping<'a>(&'a self) -> ProviderFuture<'a, ()> {
        Box::pin(async { Err(ReportError::data_fetch("connection refused")) })
    }
}

pub fn in_memory_templates() -> TemplateStore {
    TemplateStore::in_memory(Template::from_bytes(&template_docx()).unwrap())
}

pub fn build_app(provider: Arc<dyn DataProvider>, templates: TemplateStore) -> axum::Router {
    let state = AppState::new(
        provider,
        templates,
        SchoolProfile::default(),
        BatchConfig::default(),
        CorsConfig::default(),
    );
    init_router(state, None)
}

pub fn setup_test_app() -> axum::Router {
    build_app(Arc::new(fixture_provider()), in_memory_templates())
}

pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, body)
}
