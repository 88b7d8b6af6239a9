//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! Holds no mutable data of its own. Circuits, users and messages live in
//! SQLite; handlers receive the pool and open explicit connections or
//! transactions per stage.

use std::sync::Arc;

use axum::http::HeaderValue;
use metrics_exporter_prometheus::PrometheusHandle;
use ringboard_core::DEFAULT_MAX_AUTHORS;
use ringboard_zkp::VerifierBackend;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub verifier: Arc<VerifierBackend>,
    /// Upper bound on `userIds` per submission.
    pub max_authors: usize,
    /// Browser origin allowed by CORS. `None` disables the CORS layer.
    pub cors_origin: Option<HeaderValue>,
    /// Present when metrics are enabled; renders `/metrics`.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// State with default limits, no CORS origin and metrics disabled.
    pub fn new(pool: SqlitePool, verifier: VerifierBackend) -> Self {
        Self {
            pool,
            verifier: Arc::new(verifier),
            max_authors: DEFAULT_MAX_AUTHORS,
            cors_origin: None,
            metrics: None,
        }
    }

    pub fn with_max_authors(mut self, max_authors: usize) -> Self {
        self.max_authors = max_authors;
        self
    }

    pub fn with_cors_origin(mut self, origin: HeaderValue) -> Self {
        self.cors_origin = Some(origin);
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
