use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::modules::diagnostics::router::init_diagnostics_router;
use crate::modules::health::router::init_health_router;
use crate::modules::reports::router::init_reports_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use metrics_exporter_prometheus::PrometheusHandle;
use reportcard_config::CorsConfig;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let cors = cors_layer(&state.cors_config);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .merge(init_health_router())
                .merge(init_reports_router())
                .merge(init_diagnostics_router()),
        )
        .with_state(state);

    if let Some(handle) = metrics {
        router = router.merge(metrics_app(handle));
    }

    router
        .layer(cors)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

/// Any origin when `*` is configured, otherwise the listed origins with
/// credentials allowed.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins).allow_credentials(true)
}
