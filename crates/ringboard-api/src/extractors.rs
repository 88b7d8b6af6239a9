//! # Custom Extractors & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and helpers to extract
//! JSON bodies and query strings in handlers. Every rejection, from a
//! missing content type to an unknown field, becomes a
//! `VALIDATION_ERROR` before any storage work begins.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use ringboard_core::ValidationError;

use crate::error::AppError;

/// Request types that check rules serde cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::Validation`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::from(ValidationError::Malformed(err.body_text())))
}

/// Extract query parameters, mapping parse errors to [`AppError::Validation`].
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::from(ValidationError::Malformed(err.body_text())))
}

/// Extract a path parameter, mapping parse errors to [`AppError::Validation`].
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| AppError::from(ValidationError::Malformed(err.body_text())))
}
