use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{batch_generate, generate_word_report};

/// Routes: POST /generate-word-report, POST /batch-generate
pub fn init_reports_router() -> Router<AppState> {
    Router::new()
        .route("/generate-word-report", post(generate_word_report))
        .route("/batch-generate", post(batch_generate))
}
