use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{test_backend, test_provider};

/// Routes: GET /test, GET /test-firebase
pub fn init_diagnostics_router() -> Router<AppState> {
    Router::new()
        .route("/test", get(test_backend))
        .route("/test-firebase", get(test_provider))
}
