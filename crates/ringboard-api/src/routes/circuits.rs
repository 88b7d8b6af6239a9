//! # Circuit Registry API

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use ringboard_core::{BoardError, Circuit, CircuitId, CircuitSummary, NewCircuit, Resource};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_json, extract_path};
use crate::state::AppState;

/// Body of `POST /circuits`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateCircuitRequest {
    /// Unique human-readable name.
    pub name: String,
    /// Opaque circuit description.
    pub circuit: String,
    /// Opaque verifier parameters.
    pub verifier_circuit_data: String,
}

impl From<CreateCircuitRequest> for NewCircuit {
    fn from(req: CreateCircuitRequest) -> Self {
        Self {
            name: req.name,
            circuit: req.circuit,
            verifier_circuit_data: req.verifier_circuit_data,
        }
    }
}

/// Register a circuit. Shared by the HTTP handler and the CLI.
pub async fn register(pool: &sqlx::SqlitePool, new: NewCircuit) -> Result<Circuit, BoardError> {
    new.validate()?;
    db::circuits::insert(pool, &new).await.map_err(|e| {
        if db::is_unique_violation(&e) {
            BoardError::Conflict(format!("circuit name {:?} already exists", new.name))
        } else {
            db::storage(e)
        }
    })
}

/// Build the circuits router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/circuits", get(list_circuits).post(create_circuit))
        .route("/circuits/{id}", get(get_circuit))
}

/// POST /circuits: Register a circuit.
#[utoipa::path(
    post,
    path = "/circuits",
    request_body = CreateCircuitRequest,
    responses(
        (status = 201, description = "Circuit registered"),
        (status = 400, description = "Missing field or duplicate name", body = crate::error::ErrorBody),
    ),
    tag = "circuits"
)]
pub(crate) async fn create_circuit(
    State(state): State<AppState>,
    body: Result<Json<CreateCircuitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Circuit>), AppError> {
    let req = extract_json(body)?;
    let circuit = register(&state.pool, req.into()).await?;
    tracing::info!(circuit_id = %circuit.id, name = %circuit.name, "circuit registered");
    Ok((StatusCode::CREATED, Json(circuit)))
}

/// GET /circuits: List circuits (id and name only).
#[utoipa::path(
    get,
    path = "/circuits",
    responses((status = 200, description = "Circuit summaries")),
    tag = "circuits"
)]
pub(crate) async fn list_circuits(
    State(state): State<AppState>,
) -> Result<Json<Vec<CircuitSummary>>, AppError> {
    let circuits = db::circuits::list(&state.pool).await.map_err(db::storage)?;
    Ok(Json(circuits))
}

/// GET /circuits/{id}: Fetch a full circuit record.
#[utoipa::path(
    get,
    path = "/circuits/{id}",
    params(("id" = i64, Path, description = "Circuit ID")),
    responses(
        (status = 200, description = "Circuit with verifier data"),
        (status = 400, description = "No such circuit", body = crate::error::ErrorBody),
    ),
    tag = "circuits"
)]
pub(crate) async fn get_circuit(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Circuit>, AppError> {
    let id = CircuitId::new(extract_path(path)?);
    let circuit = db::circuits::get_by_id(&state.pool, id)
        .await
        .map_err(db::storage)?
        .ok_or(BoardError::NotFound(Resource::Circuit))?;
    Ok(Json(circuit))
}
