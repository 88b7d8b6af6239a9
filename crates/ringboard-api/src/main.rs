//! # ringboard-api server binary
//!
//! Reads configuration from the environment, opens and migrates the
//! database, builds the configured verifier and serves the API until
//! Ctrl-C.

use axum::http::HeaderValue;
use ringboard_api::config::AppConfig;
use ringboard_api::state::AppState;
use ringboard_api::{db, middleware};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ringboard_api::init_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;
    let pool = db::init_pool(&config.database_url).await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let verifier = config.verifier_backend();

    let mut state = AppState::new(pool, verifier)
        .with_max_authors(config.max_authors)
        .with_cors_origin(HeaderValue::from_str(&config.cors_origin)?);
    if config.metrics_enabled {
        state = state.with_metrics(middleware::metrics::install_recorder()?);
    }

    let app = ringboard_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Ringboard API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("shutdown signal received");
}
