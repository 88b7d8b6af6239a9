//! # Database Persistence Layer
//!
//! SQLite persistence via SQLx for the three registries: circuits, users
//! and messages (with their author rows).
//!
//! Query functions are generic over [`sqlx::SqliteExecutor`] where they
//! are used both against the pool and inside a transaction. Functions that
//! must run inside the submission transaction take `&mut SqliteConnection`.
//! All of them return `sqlx::Error`; callers classify it with [`storage`] or
//! [`is_unique_violation`].

pub mod circuits;
pub mod messages;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use ringboard_core::BoardError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Open the pool and apply embedded migrations.
///
/// Foreign keys are enforced on every connection. File databases use WAL so
/// readers are not blocked by the submission writer. An in-memory database
/// lives only as long as its connection, so it gets exactly one connection
/// that is never recycled.
pub async fn init_pool(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = url.contains(":memory:") || url.contains("mode=memory");

    let mut options = SqliteConnectOptions::from_str(url)?
        .foreign_keys(true)
        .create_if_missing(true);
    if !in_memory {
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5));
    let pool_options = if in_memory {
        pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(8)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!(in_memory, "connected to SQLite");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    Ok(pool)
}

/// Liveness check used by the readiness probe.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Whether the error is a UNIQUE constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

/// Wrap a storage failure. The detail goes to the log, not the caller.
pub fn storage(err: sqlx::Error) -> BoardError {
    tracing::error!(error = %err, "storage operation failed");
    BoardError::Storage(err.to_string())
}
