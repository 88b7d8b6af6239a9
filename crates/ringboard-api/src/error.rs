//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`BoardError`] kinds to HTTP status codes and returns a JSON body
//! with a machine-readable code and a short message.
//!
//! The board client treats every rejected request the same way, so all
//! client-side failures are `400 Bad Request` and are told apart by `code`.
//! Storage failures are `500`; their detail is logged and never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ringboard_core::{BoardError, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VERIFICATION_FAILED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body or parameters failed validation (400).
    #[error("{0}")]
    Validation(String),

    /// Referenced record does not exist (400).
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation (400).
    #[error("{0}")]
    Conflict(String),

    /// Proof missing or rejected (400).
    #[error("{0}")]
    Verification(String),

    /// Storage failure (500). Message is logged but not returned to client.
    #[error("storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::NotFound(_) => (StatusCode::BAD_REQUEST, "NOT_FOUND"),
            Self::Conflict(_) => (StatusCode::BAD_REQUEST, "CONFLICT"),
            Self::Verification(_) => (StatusCode::BAD_REQUEST, "VERIFICATION_FAILED"),
            Self::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Storage(_) => {
                tracing::error!(error = %self, "storage failure");
                "A storage error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<BoardError> for AppError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::Validation(e) => Self::Validation(e.to_string()),
            e @ BoardError::NotFound(_) => Self::NotFound(e.to_string()),
            BoardError::Conflict(msg) => Self::Conflict(msg),
            e @ BoardError::Verification(_) => Self::Verification(e.to_string()),
            BoardError::Storage(msg) => Self::Storage(msg),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
