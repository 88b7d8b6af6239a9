//! # OpenAPI Document Assembly
//!
//! Collects the utoipa-documented handlers into one OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ringboard API",
        version = "0.1.0",
        description = "Anonymous bulletin board gated by zero-knowledge ring proofs.\n\nA message is stored only after the verifier accepts a proof that its author holds one of the listed users' keys. Registries for circuits and users are unauthenticated.",
        license(name = "AGPL-3.0-or-later")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server"),
    ),
    paths(
        crate::routes::messages::submit_message,
        crate::routes::messages::list_messages,
        crate::routes::messages::get_message,
        crate::routes::circuits::create_circuit,
        crate::routes::circuits::list_circuits,
        crate::routes::circuits::get_circuit,
        crate::routes::users::create_user,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::submission::SubmitMessageRequest,
        crate::routes::circuits::CreateCircuitRequest,
        crate::routes::users::CreateUserRequest,
    )),
    tags(
        (name = "messages", description = "Proof-gated message submission and the public feed"),
        (name = "circuits", description = "Circuit registry"),
        (name = "users", description = "User and public key registry"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
