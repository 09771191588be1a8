use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use reportcard_models::BatchSummary;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Initialize Prometheus metrics exporter with upkeep task.
/// Returns None if observability is disabled.
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5,
                10.0,
            ],
        )?
        .set_buckets_for_metric(
            Matcher::Full("report_generation_duration_seconds".to_string()),
            &[0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 15.0, 30.0],
        )?
        .install_recorder()?;

    // Clean stale metrics
    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Metrics middleware to track HTTP requests
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let uri_path = req.uri().path().to_owned();

    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or(uri_path);

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status.to_string()).increment(1);

    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    let status_category = match status {
        200..=299 => "2xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    };
    counter!("http_requests_by_status", "status_category" => status_category).increment(1);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router serving the Prometheus exposition on `/metrics`
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics helpers

/// Counts a single-report generation attempt. `status` is `success` or the
/// failure kind.
pub fn track_report_generated(mode: &'static str, status: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("reports_generated_total", "mode" => mode, "status" => status).increment(1);
}

pub fn track_report_duration(mode: &'static str, duration_secs: f64) {
    if !is_observability_enabled() {
        return;
    }
    histogram!("report_generation_duration_seconds", "mode" => mode).record(duration_secs);
}

/// Records one finished batch and its per-student outcomes.
pub fn track_batch_run(summary: &BatchSummary) {
    if !is_observability_enabled() {
        return;
    }
    counter!("batch_runs_total").increment(1);
    counter!("batch_students_total", "status" => "success").increment(summary.succeeded as u64);
    counter!("batch_students_total", "status" => "failure").increment(summary.failed as u64);
    counter!("reports_generated_total", "mode" => "batch", "status" => "success")
        .increment(summary.succeeded as u64);
    counter!("reports_generated_total", "mode" => "batch", "status" => "failure")
        .increment(summary.failed as u64);
}

/// Counts a provider connectivity check.
pub fn track_provider_check(success: bool) {
    if !is_observability_enabled() {
        return;
    }
    let status = if success { "success" } else { "failure" };
    counter!("provider_checks_total", "status" => status).increment(1);
}
