//! Integration tests for the Ringboard API.
//!
//! Each test builds the full router over a fresh in-memory SQLite database
//! and drives it with `tower::ServiceExt::oneshot`. Proofs come from the
//! mock verifier, which accepts exactly the SHA-256 digest of the
//! canonical statement, so a test can produce valid and invalid proofs
//! without a real prover.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use ringboard_api::db;
use ringboard_api::state::AppState;
use ringboard_api::submission::{self, SubmitMessageRequest, ValidatedSubmission, VerifiedSubmission};
use ringboard_core::{AuthorSet, CanonicalKeys, CircuitId, UserId, DEFAULT_MAX_AUTHORS};
use ringboard_zkp::{
    CircuitDescriptor, MockVerifier, ProofVerifier, PublicInputPayload, Verdict,
    VerificationRequest, VerifierBackend,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

// -- Helpers ------------------------------------------------------------------

struct TestBoard {
    app: Router,
    pool: SqlitePool,
    mock: MockVerifier,
}

async fn test_pool() -> SqlitePool {
    db::init_pool("sqlite::memory:").await.unwrap()
}

async fn test_board_with(configure: impl FnOnce(AppState) -> AppState) -> TestBoard {
    let pool = test_pool().await;
    let mock = MockVerifier::new();
    let state = configure(AppState::new(
        pool.clone(),
        VerifierBackend::Mock(mock.clone()),
    ));
    TestBoard {
        app: ringboard_api::app(state),
        pool,
        mock,
    }
}

async fn test_board() -> TestBoard {
    test_board_with(|s| s).await
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = body_string(response).await;
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

async fn post_raw(app: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = body_string(response).await;
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

async fn add_circuit(app: &Router, name: &str) -> i64 {
    let (status, body) = post(
        app,
        "/circuits",
        json!({ "name": name, "circuit": "C1", "verifier_circuit_data": "VD1" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["_id"].as_i64().unwrap()
}

async fn add_user(app: &Router, name: &str, key: &str) -> i64 {
    let (status, body) = post(app, "/users", json!({ "name": name, "public_key": key })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["_id"].as_i64().unwrap()
}

/// The proof the mock verifier accepts for circuit blobs C1/VD1.
fn mock_proof(message: &str, keys: &[&str]) -> String {
    MockVerifier::prove(
        &CircuitDescriptor {
            verifier_circuit_data: "VD1".into(),
            circuit: "C1".into(),
        },
        &PublicInputPayload {
            message: message.into(),
            public_keys: CanonicalKeys::from_keys(keys.iter().copied()),
        },
    )
    .unwrap()
}

async fn message_count(pool: &SqlitePool) -> i64 {
    db::messages::count(pool).await.unwrap()
}

// -- Health probes ------------------------------------------------------------

#[tokio::test]
async fn liveness_returns_ok() {
    let board = test_board().await;
    let response = board
        .app
        .oneshot(
            Request::builder()
                .uri("/health/liveness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn readiness_returns_ready() {
    let board = test_board().await;
    let response = board
        .app
        .oneshot(
            Request::builder()
                .uri("/health/readiness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn readiness_fails_when_pool_closed() {
    let board = test_board().await;
    board.pool.close().await;
    let response = board
        .app
        .oneshot(
            Request::builder()
                .uri("/health/readiness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_string(response).await, "database unreachable");
}

// -- Submission ---------------------------------------------------------------

#[tokio::test]
async fn accepted_submission_is_stored_with_author_order() {
    let board = test_board().await;
    let circuit = add_circuit(&board.app, "ring-v1").await;
    let alice = add_user(&board.app, "alice", "kA").await;
    let _bob = add_user(&board.app, "bob", "kB").await;
    let carol = add_user(&board.app, "carol", "kC").await;

    let proof = mock_proof("hello", &["kC", "kA"]);
    let (status, body) = post(
        &board.app,
        "/messages",
        json!({
            "userIds": [carol, alice],
            "message": "hello",
            "proof": proof,
            "circuit_id": circuit,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "hello");
    assert_eq!(body["userIds"], json!([carol, alice]));
    assert_eq!(body["circuit_id"], circuit);
    assert!(body["timestamp"].is_string());
    assert_eq!(board.mock.invocations(), 1);

    let id = body["_id"].as_i64().unwrap();
    let (status, fetched) = get(&board.app, &format!("/messages/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["userIds"], json!([carol, alice]));
    assert_eq!(fetched["proof"], proof.as_str());

    let (_, listed) = get(&board.app, "/messages").await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn author_order_does_not_change_verifier_input() {
    let board = test_board().await;
    let circuit = add_circuit(&board.app, "ring-v1").await;
    let alice = add_user(&board.app, "alice", "kA").await;
    let bob = add_user(&board.app, "bob", "kB").await;

    let proof = mock_proof("same", &["kA", "kB"]);
    for ids in [[alice, bob], [bob, alice]] {
        let (status, body) = post(
            &board.app,
            "/messages",
            json!({ "userIds": ids, "message": "same", "proof": proof, "circuit_id": circuit }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }
    assert_eq!(message_count(&board.pool).await, 2);
}

#[tokio::test]
async fn rejected_proof_stores_nothing() {
    let board = test_board().await;
    let circuit = add_circuit(&board.app, "ring-v1").await;
    let alice = add_user(&board.app, "alice", "kA").await;

    let (status, body) = post(
        &board.app,
        "/messages",
        json!({ "userIds": [alice], "message": "hello", "proof": "forged", "circuit_id": circuit }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VERIFICATION_FAILED");
    assert_eq!(board.mock.invocations(), 1);
    assert_eq!(message_count(&board.pool).await, 0);
}

#[tokio::test]
async fn proof_for_other_message_is_rejected() {
    let board = test_board().await;
    let circuit = add_circuit(&board.app, "ring-v1").await;
    let alice = add_user(&board.app, "alice", "kA").await;

    let (status, body) = post(
        &board.app,
        "/messages",
        json!({
            "userIds": [alice],
            "message": "tampered",
            "proof": mock_proof("original", &["kA"]),
            "circuit_id": circuit,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VERIFICATION_FAILED");
    assert_eq!(message_count(&board.pool).await, 0);
}

#[tokio::test]
async fn unknown_circuit_is_not_found_before_verification() {
    let board = test_board().await;
    let alice = add_user(&board.app, "alice", "kA").await;

    let (status, body) = post(
        &board.app,
        "/messages",
        json!({ "userIds": [alice], "message": "hello", "proof": "P", "circuit_id": 999 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "NOT_FOUND");
    assert_eq!(board.mock.invocations(), 0);
    assert_eq!(message_count(&board.pool).await, 0);
}

#[tokio::test]
async fn unknown_user_is_not_found_before_verification() {
    let board = test_board().await;
    let circuit = add_circuit(&board.app, "ring-v1").await;
    let alice = add_user(&board.app, "alice", "kA").await;

    let (status, body) = post(
        &board.app,
        "/messages",
        json!({
            "userIds": [alice, 4242],
            "message": "hello",
            "proof": mock_proof("hello", &["kA"]),
            "circuit_id": circuit,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "NOT_FOUND");
    assert_eq!(board.mock.invocations(), 0);
    assert_eq!(message_count(&board.pool).await, 0);
}

#[tokio::test]
async fn author_set_bounds_are_validation_errors() {
    let board = test_board_with(|s| s.with_max_authors(2)).await;
    let circuit = add_circuit(&board.app, "ring-v1").await;
    let a = add_user(&board.app, "a", "kA").await;
    let b = add_user(&board.app, "b", "kB").await;
    let c = add_user(&board.app, "c", "kC").await;

    for ids in [json!([]), json!([a, a]), json!([a, b, c])] {
        let (status, body) = post(
            &board.app,
            "/messages",
            json!({ "userIds": ids, "message": "hello", "proof": "P", "circuit_id": circuit }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{ids}");
        assert_eq!(error_code(&body), "VALIDATION_ERROR", "{ids}");
    }
    assert_eq!(board.mock.invocations(), 0);
}

#[tokio::test]
async fn missing_or_empty_proof_fails_without_verifier() {
    let board = test_board().await;
    let circuit = add_circuit(&board.app, "ring-v1").await;
    let alice = add_user(&board.app, "alice", "kA").await;

    let bodies = [
        json!({ "userIds": [alice], "message": "hello", "circuit_id": circuit }),
        json!({ "userIds": [alice], "message": "hello", "proof": "", "circuit_id": circuit }),
    ];
    for request in bodies {
        let (status, body) = post(&board.app, "/messages", request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "VERIFICATION_FAILED");
    }
    assert_eq!(board.mock.invocations(), 0);
}

#[tokio::test]
async fn empty_message_is_validation_error() {
    let board = test_board().await;
    let circuit = add_circuit(&board.app, "ring-v1").await;
    let alice = add_user(&board.app, "alice", "kA").await;

    let (status, body) = post(
        &board.app,
        "/messages",
        json!({ "userIds": [alice], "message": "", "proof": "P", "circuit_id": circuit }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
    assert_eq!(board.mock.invocations(), 0);
}

#[tokio::test]
async fn whitespace_message_is_accepted() {
    let board = test_board().await;
    let circuit = add_circuit(&board.app, "ring-v1").await;
    let alice = add_user(&board.app, "alice", "kA").await;

    let (status, body) = post(
        &board.app,
        "/messages",
        json!({
            "userIds": [alice],
            "message": " ",
            "proof": mock_proof(" ", &["kA"]),
            "circuit_id": circuit,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], " ");
}

#[tokio::test]
async fn malformed_bodies_are_validation_errors() {
    let board = test_board().await;

    let (status, body) = post(
        &board.app,
        "/messages",
        json!({ "userIds": [1], "message": "hi", "proof": "P", "circuit_id": 1, "extra": true }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");

    let (status, body) = post_raw(&board.app, "/messages", "{not json".into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");

    let (status, body) = post(&board.app, "/messages", json!({ "message": "hi" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn keyless_authors_reach_verifier_with_empty_ring() {
    let board = test_board().await;
    let circuit = add_circuit(&board.app, "ring-v1").await;
    // Registration refuses empty keys, so a legacy row is written directly.
    let legacy = sqlx::query("INSERT INTO users (name, public_key) VALUES ('legacy', '')")
        .execute(&board.pool)
        .await
        .unwrap()
        .last_insert_rowid();
    let alice = add_user(&board.app, "alice", "kA").await;

    let (status, body) = post(
        &board.app,
        "/messages",
        json!({
            "userIds": [legacy, alice],
            "message": "hello",
            "proof": mock_proof("hello", &["kA"]),
            "circuit_id": circuit,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["userIds"], json!([legacy, alice]));
}

#[tokio::test]
async fn persist_is_all_or_nothing() {
    let pool = test_pool().await;

    sqlx::query("INSERT INTO circuits (name, circuit, verifier_circuit_data) VALUES ('c', 'C1', 'VD1')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO users (name, public_key) VALUES ('alice', 'kA')")
        .execute(&pool)
        .await
        .unwrap();

    let mock = MockVerifier::new();
    let request = VerificationRequest::new(
        CircuitDescriptor {
            verifier_circuit_data: "VD1".into(),
            circuit: "C1".into(),
        },
        mock_proof("hello", &["kA"]),
        "hello",
        CanonicalKeys::from_keys(["kA"]),
    );
    let acceptance = match mock.verify(&request).await.unwrap() {
        Verdict::Accepted(a) => a,
        Verdict::Rejected { reason } => panic!("mock rejected: {reason}"),
    };

    // The second author has no user row, so the author insert violates its
    // foreign key after the message row is already written.
    let authors = AuthorSet::new(vec![UserId::new(1), UserId::new(77)], DEFAULT_MAX_AUTHORS).unwrap();
    let verified = VerifiedSubmission::new(
        acceptance,
        ValidatedSubmission {
            message: "hello".into(),
            proof: request.proof.proof.clone(),
            circuit_id: CircuitId::new(1),
            authors,
        },
    );

    let err = submission::persist(&pool, verified).await.unwrap_err();
    assert_eq!(err.code(), "STORAGE_ERROR");
    assert_eq!(message_count(&pool).await, 0);
    let authors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM message_users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(authors, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_all_commit_whole() {
    let dir = tempfile::TempDir::new().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("board.sqlite").display());
    let pool = db::init_pool(&url).await.unwrap();
    let state = AppState::new(pool.clone(), VerifierBackend::Mock(MockVerifier::new()));

    sqlx::query("INSERT INTO circuits (name, circuit, verifier_circuit_data) VALUES ('c', 'C1', 'VD1')")
        .execute(&pool)
        .await
        .unwrap();
    let mut users = Vec::new();
    for (name, key) in [("alice", "kA"), ("bob", "kB"), ("carol", "kC")] {
        let id = sqlx::query("INSERT INTO users (name, public_key) VALUES (?, ?)")
            .bind(name)
            .bind(key)
            .execute(&pool)
            .await
            .unwrap()
            .last_insert_rowid();
        users.push(UserId::new(id));
    }

    const SUBMISSIONS: usize = 32;
    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..SUBMISSIONS {
        // Rotate and sometimes reverse the ring so authors arrive in mixed orders.
        let mut user_ids = users.clone();
        user_ids.rotate_left(i % 3);
        if i % 2 == 1 {
            user_ids.reverse();
        }
        let text = format!("note {i}");
        let request = SubmitMessageRequest {
            user_ids: user_ids.clone(),
            proof: Some(mock_proof(&text, &["kA", "kB", "kC"])),
            message: text,
            circuit_id: CircuitId::new(1),
        };
        let state = state.clone();
        tasks.spawn(async move { (user_ids, submission::submit(&state, request).await) });
    }

    while let Some(joined) = tasks.join_next().await {
        let (user_ids, result) = joined.unwrap();
        let stored = result.unwrap();
        assert_eq!(stored.user_ids, user_ids);
    }

    assert_eq!(message_count(&pool).await, SUBMISSIONS as i64);
    let orphans: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM messages m \
         WHERE NOT EXISTS (SELECT 1 FROM message_users mu WHERE mu.message_id = m.id)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(orphans, 0);
    let authors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM message_users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(authors, (SUBMISSIONS * 3) as i64);
}

// -- Message reads --------------------------------------------------------------

#[tokio::test]
async fn message_listing_is_newest_first_and_paginated() {
    let board = test_board().await;
    let circuit = add_circuit(&board.app, "ring-v1").await;
    let alice = add_user(&board.app, "alice", "kA").await;

    for text in ["first", "second", "third"] {
        let (status, _) = post(
            &board.app,
            "/messages",
            json!({
                "userIds": [alice],
                "message": text,
                "proof": mock_proof(text, &["kA"]),
                "circuit_id": circuit,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, all) = get(&board.app, "/messages").await;
    assert_eq!(status, StatusCode::OK);
    let texts: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["message"].as_str().unwrap())
        .collect();
    assert_eq!(texts, ["third", "second", "first"]);

    let (_, page) = get(&board.app, "/messages?limit=1&offset=1").await;
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["message"], "second");

    let (status, body) = get(&board.app, "/messages?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_message_is_not_found() {
    let board = test_board().await;
    let (status, body) = get(&board.app, "/messages/999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "NOT_FOUND");

    let (status, body) = get(&board.app, "/messages/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

// -- Registries -----------------------------------------------------------------

#[tokio::test]
async fn circuit_listing_omits_blobs() {
    let board = test_board().await;
    let id = add_circuit(&board.app, "ring-v1").await;

    let (status, list) = get(&board.app, "/circuits").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([{ "_id": id, "name": "ring-v1" }]));

    let (status, full) = get(&board.app, &format!("/circuits/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(full["circuit"], "C1");
    assert_eq!(full["verifier_circuit_data"], "VD1");
}

#[tokio::test]
async fn duplicate_circuit_name_conflicts() {
    let board = test_board().await;
    add_circuit(&board.app, "ring-v1").await;

    let (status, body) = post(
        &board.app,
        "/circuits",
        json!({ "name": "ring-v1", "circuit": "C2", "verifier_circuit_data": "VD2" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "CONFLICT");
}

#[tokio::test]
async fn circuit_registration_requires_every_field() {
    let board = test_board().await;
    let (status, body) = post(
        &board.app,
        "/circuits",
        json!({ "name": "", "circuit": "C1", "verifier_circuit_data": "VD1" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");

    let (status, body) = post(&board.app, "/circuits", json!({ "name": "x", "circuit": "C1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn users_round_trip() {
    let board = test_board().await;
    let id = add_user(&board.app, "alice", "kA").await;

    let (status, user) = get(&board.app, &format!("/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user, json!({ "_id": id, "name": "alice", "public_key": "kA" }));

    let (_, list) = get(&board.app, "/users").await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = get(&board.app, "/users/12345").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

// -- OpenAPI and metrics ----------------------------------------------------------

#[tokio::test]
async fn openapi_document_is_served() {
    let board = test_board().await;
    let (status, doc) = get(&board.app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/messages"].is_object());
}

#[tokio::test]
async fn metrics_route_only_when_enabled() {
    let board = test_board().await;
    let response = board
        .app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let handle = PrometheusBuilder::new().build_recorder().handle();
    let board = test_board_with(|s| s.with_metrics(handle)).await;
    let response = board
        .app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- External verifier ------------------------------------------------------------

#[cfg(unix)]
mod external {
    use std::os::unix::fs::PermissionsExt;
    use std::time::Duration;

    use ringboard_zkp::{ExternalVerifier, ExternalVerifierConfig};
    use tempfile::TempDir;

    use super::*;

    async fn board_with_script(body: &str) -> (TestBoard, TempDir) {
        let dir = TempDir::new().unwrap();
        let binary = dir.path().join("verify.sh");
        std::fs::write(&binary, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&binary).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&binary, perms).unwrap();

        let pool = test_pool().await;
        let verifier = ExternalVerifier::new(ExternalVerifierConfig {
            binary,
            work_dir: dir.path().join("tmp"),
            timeout: Duration::from_secs(10),
        });
        let state = AppState::new(pool.clone(), VerifierBackend::External(verifier));
        let board = TestBoard {
            app: ringboard_api::app(state),
            pool,
            mock: MockVerifier::new(),
        };
        (board, dir)
    }

    async fn submit_one(board: &TestBoard) -> (StatusCode, Value) {
        let circuit = add_circuit(&board.app, "ring-v1").await;
        let alice = add_user(&board.app, "alice", "kA").await;
        post(
            &board.app,
            "/messages",
            json!({ "userIds": [alice], "message": "hello", "proof": "P", "circuit_id": circuit }),
        )
        .await
    }

    #[tokio::test]
    async fn success_marker_accepts() {
        let (board, _dir) = board_with_script("printf 'success\\n'").await;
        let (status, body) = submit_one(&board).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(message_count(&board.pool).await, 1);
    }

    #[tokio::test]
    async fn failing_verifier_rejects() {
        let (board, _dir) = board_with_script("echo 'bad proof' >&2; exit 1").await;
        let (status, body) = submit_one(&board).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "VERIFICATION_FAILED");
        assert!(!body.to_string().contains("bad proof"));
        assert_eq!(message_count(&board.pool).await, 0);
    }
}
