//! # Prometheus Metrics
//!
//! Metrics are recorded through the `metrics` facade. The HTTP middleware
//! records request counts and latency; the submission pipeline and the
//! verifier backend record their own counters. A single Prometheus
//! recorder renders all of them at `/metrics`.
//!
//! Paths are labelled with the matched route template (`/messages/{id}`)
//! rather than the raw URI, so ids do not explode label cardinality.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the process-global Prometheus recorder.
///
/// May only succeed once per process. Tests that need a handle without a
/// global recorder should use `PrometheusBuilder::build_recorder` instead.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record `ringboard_http_requests_total` and
/// `ringboard_http_request_duration_seconds` for every request.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    ::metrics::counter!(
        "ringboard_http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    ::metrics::histogram!(
        "ringboard_http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(start.elapsed().as_secs_f64());

    response
}
