//! # User Registry API

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use ringboard_core::{BoardError, NewUser, Resource, User, UserId};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_json, extract_path};
use crate::state::AppState;

/// Body of `POST /users`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: String,
    /// Opaque public key used as a ring member.
    pub public_key: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            public_key: req.public_key,
        }
    }
}

/// Register a user. Shared by the HTTP handler and the CLI.
pub async fn register(pool: &sqlx::SqlitePool, new: NewUser) -> Result<User, BoardError> {
    new.validate()?;
    db::users::insert(pool, &new).await.map_err(db::storage)
}

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
}

/// POST /users: Register a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Missing name or key", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub(crate) async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let req = extract_json(body)?;
    let user = register(&state.pool, req.into()).await?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users: List users.
#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "Users with their public keys")),
    tag = "users"
)]
pub(crate) async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = db::users::list(&state.pool).await.map_err(db::storage)?;
    Ok(Json(users))
}

/// GET /users/{id}: Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found"),
        (status = 400, description = "No such user", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let id = UserId::new(extract_path(path)?);
    let user = db::users::get_by_id(&state.pool, id)
        .await
        .map_err(db::storage)?
        .ok_or(BoardError::NotFound(Resource::User))?;
    Ok(Json(user))
}
