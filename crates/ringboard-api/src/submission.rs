//! # Proof-Gated Message Submission
//!
//! ```text
//! Validate → ResolveUsers → ResolveCircuit → Canonicalize → Verify → Persist
//! ```
//!
//! Each stage consumes the previous stage's output type, so stages cannot
//! be skipped or reordered. The first failure short-circuits with a
//! [`BoardError`].
//!
//! ## Storage boundaries
//!
//! Resolution reads users and the circuit through one explicitly acquired
//! connection inside a read transaction, which ends before the verifier is
//! called. No lock is held while the external verifier runs. Persist opens
//! its own write transaction; users and circuits are immutable, so the
//! author set that was verified is the one that gets written.
//!
//! ## Fail-closed
//!
//! [`persist`] takes a [`VerifiedSubmission`], which can only be built from
//! an [`Acceptance`]. A rejection, a verifier error and a timeout all become
//! `VERIFICATION_FAILED`.

use chrono::Utc;
use ringboard_core::{
    AuthorSet, BoardError, CanonicalKeys, Circuit, CircuitId, Message, Resource, UserId,
    ValidationError, VerificationFailure,
};
use ringboard_zkp::{Acceptance, CircuitDescriptor, ProofVerifier, Verdict, VerificationRequest};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::db;
use crate::extractors::Validate;
use crate::state::AppState;

/// Body of `POST /messages`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SubmitMessageRequest {
    /// Claimed ring members, in any order.
    #[serde(rename = "userIds")]
    #[schema(value_type = Vec<i64>)]
    pub user_ids: Vec<UserId>,
    pub message: String,
    /// Opaque ring-signature proof.
    #[serde(default)]
    pub proof: Option<String>,
    #[schema(value_type = i64)]
    pub circuit_id: CircuitId,
}

impl Validate for SubmitMessageRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        // Whitespace is content; only the empty string is missing.
        if self.message.is_empty() {
            return Err(ValidationError::MissingField("message"));
        }
        Ok(())
    }
}

/// Output of the validate stage.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub message: String,
    pub proof: String,
    pub circuit_id: CircuitId,
    pub authors: AuthorSet,
}

/// Output of resolution and canonicalization.
#[derive(Debug, Clone)]
pub struct ResolvedSubmission {
    pub submission: ValidatedSubmission,
    pub circuit: Circuit,
    pub keys: CanonicalKeys,
}

/// A submission the verifier accepted. The only input [`persist`] takes.
#[derive(Debug)]
pub struct VerifiedSubmission {
    message: String,
    proof: String,
    circuit_id: CircuitId,
    authors: AuthorSet,
    _acceptance: Acceptance,
}

impl VerifiedSubmission {
    pub fn new(acceptance: Acceptance, submission: ValidatedSubmission) -> Self {
        Self {
            message: submission.message,
            proof: submission.proof,
            circuit_id: submission.circuit_id,
            authors: submission.authors,
            _acceptance: acceptance,
        }
    }

    pub fn authors(&self) -> &AuthorSet {
        &self.authors
    }
}

/// Validate stage: message text, proof presence and the author set.
pub fn validate(
    request: SubmitMessageRequest,
    max_authors: usize,
) -> Result<ValidatedSubmission, BoardError> {
    request.validate()?;
    let authors = AuthorSet::new(request.user_ids, max_authors)?;
    let proof = match request.proof {
        Some(p) if !p.is_empty() => p,
        _ => return Err(BoardError::Verification(VerificationFailure::ProofRequired)),
    };
    Ok(ValidatedSubmission {
        message: request.message,
        proof,
        circuit_id: request.circuit_id,
        authors,
    })
}

/// ResolveUsers, ResolveCircuit and Canonicalize, in one read transaction.
pub async fn resolve(
    pool: &SqlitePool,
    submission: ValidatedSubmission,
) -> Result<ResolvedSubmission, BoardError> {
    let mut tx = pool.begin().await.map_err(db::storage)?;

    let users = db::users::get_many(&mut *tx, submission.authors.ids())
        .await
        .map_err(db::storage)?;
    let keys = CanonicalKeys::resolve(&submission.authors, &users)?;

    let circuit = db::circuits::get_by_id(&mut *tx, submission.circuit_id)
        .await
        .map_err(db::storage)?
        .ok_or(BoardError::NotFound(Resource::Circuit))?;

    tx.commit().await.map_err(db::storage)?;

    if keys.is_empty() {
        tracing::warn!(
            circuit_id = %circuit.id,
            author_count = submission.authors.len(),
            "every claimed author is keyless; verifier will see an empty ring"
        );
    }

    Ok(ResolvedSubmission {
        submission,
        circuit,
        keys,
    })
}

/// Verify stage. Anything other than acceptance is `VERIFICATION_FAILED`.
pub async fn verify<V: ProofVerifier>(
    verifier: &V,
    resolved: ResolvedSubmission,
) -> Result<VerifiedSubmission, BoardError> {
    let ResolvedSubmission {
        submission,
        circuit,
        keys,
    } = resolved;

    let request = VerificationRequest::new(
        CircuitDescriptor::from(&circuit),
        submission.proof.clone(),
        submission.message.clone(),
        keys,
    );

    match verifier.verify(&request).await {
        Ok(Verdict::Accepted(acceptance)) => Ok(VerifiedSubmission::new(acceptance, submission)),
        Ok(Verdict::Rejected { .. }) | Err(_) => {
            Err(BoardError::Verification(VerificationFailure::Rejected))
        }
    }
}

/// Persist stage: message row plus one row per author, all or nothing.
///
/// The timestamp is taken inside the transaction.
pub async fn persist(pool: &SqlitePool, verified: VerifiedSubmission) -> Result<Message, BoardError> {
    let mut tx = pool.begin().await.map_err(db::storage)?;
    let timestamp = Utc::now();

    let id = db::messages::insert_message(
        &mut tx,
        &verified.message,
        &verified.proof,
        verified.circuit_id,
        timestamp,
    )
    .await
    .map_err(db::storage)?;

    for (position, user_id) in verified.authors.ids().iter().enumerate() {
        db::messages::insert_author(&mut tx, id, *user_id, position)
            .await
            .map_err(db::storage)?;
    }

    tx.commit().await.map_err(db::storage)?;

    Ok(Message {
        id,
        message: verified.message,
        timestamp,
        proof: verified.proof,
        circuit_id: verified.circuit_id,
        user_ids: verified.authors.into_ids(),
    })
}

/// Run the whole pipeline for one request.
pub async fn submit(state: &AppState, request: SubmitMessageRequest) -> Result<Message, BoardError> {
    let result = run(state, request).await;
    let outcome = match &result {
        Ok(_) => "accepted",
        Err(e) => e.code(),
    };
    metrics::counter!("ringboard_submissions_total", "outcome" => outcome).increment(1);
    result
}

async fn run(state: &AppState, request: SubmitMessageRequest) -> Result<Message, BoardError> {
    let validated = validate(request, state.max_authors)?;
    let circuit_id = validated.circuit_id;
    let author_count = validated.authors.len();

    let resolved = resolve(&state.pool, validated).await?;
    let verified = match verify(state.verifier.as_ref(), resolved).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(%circuit_id, author_count, "submission rejected by verifier");
            return Err(e);
        }
    };
    let message = persist(&state.pool, verified).await?;

    tracing::info!(
        message_id = %message.id,
        %circuit_id,
        author_count,
        "message accepted"
    );
    Ok(message)
}
