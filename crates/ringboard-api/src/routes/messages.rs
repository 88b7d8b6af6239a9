//! # Message API
//!
//! `POST /messages` runs the submission pipeline in [`crate::submission`].
//! Reads are plain queries against the message store.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use ringboard_core::{BoardError, Message, MessageId, Resource, ValidationError};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_json, extract_path, extract_query, Validate};
use crate::state::AppState;
use crate::submission::{self, SubmitMessageRequest};

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Pagination for `GET /messages`. Omitting `limit` returns everything.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMessagesQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Validate for ListMessagesQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(limit) = self.limit {
            if !(1..=MAX_PAGE_SIZE).contains(&limit) {
                return Err(ValidationError::Malformed(format!(
                    "limit must be between 1 and {MAX_PAGE_SIZE}"
                )));
            }
        }
        if self.offset.is_some_and(|o| o < 0) {
            return Err(ValidationError::Malformed(
                "offset must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Build the messages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(list_messages).post(submit_message))
        .route("/messages/{id}", get(get_message))
}

/// POST /messages: Submit a message with a ring proof.
#[utoipa::path(
    post,
    path = "/messages",
    request_body = SubmitMessageRequest,
    responses(
        (status = 201, description = "Proof accepted and message stored"),
        (status = 400, description = "Validation, unknown user or circuit, or verification failure", body = crate::error::ErrorBody),
        (status = 500, description = "Storage failure", body = crate::error::ErrorBody),
    ),
    tag = "messages"
)]
pub(crate) async fn submit_message(
    State(state): State<AppState>,
    body: Result<Json<SubmitMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let request = extract_json(body)?;
    let message = submission::submit(&state, request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /messages: List messages, newest first.
#[utoipa::path(
    get,
    path = "/messages",
    params(ListMessagesQuery),
    responses(
        (status = 200, description = "Messages with their author ids"),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorBody),
    ),
    tag = "messages"
)]
pub(crate) async fn list_messages(
    State(state): State<AppState>,
    query: Result<Query<ListMessagesQuery>, QueryRejection>,
) -> Result<Json<Vec<Message>>, AppError> {
    let query = extract_query(query)?;
    query.validate()?;
    let messages = db::messages::list(&state.pool, query.limit, query.offset.unwrap_or(0))
        .await
        .map_err(db::storage)?;
    Ok(Json(messages))
}

/// GET /messages/{id}: Fetch one message.
#[utoipa::path(
    get,
    path = "/messages/{id}",
    params(("id" = i64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message found"),
        (status = 400, description = "No such message", body = crate::error::ErrorBody),
    ),
    tag = "messages"
)]
pub(crate) async fn get_message(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, AppError> {
    let id = MessageId::new(extract_path(path)?);
    let message = db::messages::get_by_id(&state.pool, id)
        .await
        .map_err(db::storage)?
        .ok_or(BoardError::NotFound(Resource::Message))?;
    Ok(Json(message))
}
