//! # ringboard-api: HTTP Service for the Ring-Signature Board
//!
//! Assembles the Axum application: circuit and user registries, the
//! proof-gated `POST /messages` pipeline, the message feed, health probes,
//! Prometheus metrics and the OpenAPI document.
//!
//! ## Middleware
//!
//! Registry and message routes are wrapped, innermost first, in:
//! 1. a 2 MiB request body limit,
//! 2. request metrics (when enabled),
//! 3. `TraceLayer` request tracing,
//! 4. CORS for the configured browser origin.
//!
//! Health probes and `/metrics` sit outside this stack.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod submission;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

/// Build the application router for the given state.
pub fn app(state: AppState) -> Router {
    let mut api = Router::new()
        .merge(routes::messages::router())
        .merge(routes::circuits::router())
        .merge(routes::users::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    if state.metrics.is_some() {
        api = api.layer(from_fn(middleware::metrics::track_metrics));
    }

    api = api.layer(TraceLayer::new_for_http());

    if let Some(origin) = state.cors_origin.clone() {
        api = api.layer(cors_layer(origin));
    }

    let mut probes = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    if state.metrics.is_some() {
        probes = probes.route("/metrics", get(prometheus_metrics));
    }

    Router::new()
        .merge(probes)
        .merge(api)
        .with_state(state)
}

fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Initialize the global tracing subscriber.
///
/// Filter comes from `RUST_LOG`, defaulting to `info`. `LOG_FORMAT=json`
/// switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Liveness probe. 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. 200 "ready" when the database answers, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = db::ping(&state.pool).await {
        tracing::warn!("Database health check failed: {e}");
        return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}

async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
