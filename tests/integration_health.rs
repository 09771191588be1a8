mod common;

use axum::http::StatusCode;
use common::{get_json, setup_test_app};

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get_json(setup_test_app(), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "School Management System API");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_openapi_document_lists_report_paths() {
    let (status, body) = get_json(setup_test_app(), "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/generate-word-report"));
    assert!(paths.contains_key("/api/batch-generate"));
    assert!(paths.contains_key("/api/health"));
}
