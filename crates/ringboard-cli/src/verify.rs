//! # Verify and Prove Subcommands
//!
//! `verify` re-runs a stored message through the configured verifier. It
//! resolves authors and the circuit exactly as a live submission would and
//! never writes. Useful after rotating verifier binaries, to check the
//! stored board still verifies.
//!
//! `prove` computes the proof the mock backend accepts for a statement, so
//! a development board (built with `dev-verifier` and running
//! `VERIFIER_BACKEND=mock`) can be exercised by hand.

use anyhow::{bail, Result};
use clap::Args;
use ringboard_api::db;
use ringboard_api::submission::{self, ValidatedSubmission};
use ringboard_core::{AuthorSet, CircuitId, MessageId, UserId};
use ringboard_zkp::{
    CircuitDescriptor, MockVerifier, ProofVerifier, PublicInputPayload, Verdict,
    VerificationRequest,
};
use sqlx::SqlitePool;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Id of the stored message to re-verify.
    #[arg(long)]
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct ProveArgs {
    #[arg(long)]
    pub circuit_id: i64,
    #[arg(long)]
    pub message: String,
    /// Claimed author; repeat for each ring member.
    #[arg(long = "user-id", required = true)]
    pub user_ids: Vec<i64>,
}

/// Re-verify a stored message. Returns the verifier's verdict.
pub async fn reverify<V: ProofVerifier>(
    pool: &SqlitePool,
    verifier: &V,
    id: MessageId,
) -> Result<Verdict> {
    let Some(message) = db::messages::get_by_id(pool, id).await? else {
        bail!("message {id} not found");
    };
    let authors = AuthorSet::new(message.user_ids, usize::MAX)?;
    let resolved = submission::resolve(
        pool,
        ValidatedSubmission {
            message: message.message,
            proof: message.proof,
            circuit_id: message.circuit_id,
            authors,
        },
    )
    .await?;

    let request = VerificationRequest::new(
        CircuitDescriptor::from(&resolved.circuit),
        resolved.submission.proof,
        resolved.submission.message,
        resolved.keys,
    );
    Ok(verifier.verify(&request).await?)
}

/// The mock proof for `message` signed by the ring `user_ids` on `circuit_id`.
pub async fn mock_proof(
    pool: &SqlitePool,
    circuit_id: CircuitId,
    message: &str,
    user_ids: Vec<UserId>,
) -> Result<String> {
    let authors = AuthorSet::new(user_ids, usize::MAX)?;
    let resolved = submission::resolve(
        pool,
        ValidatedSubmission {
            message: message.to_string(),
            proof: String::new(),
            circuit_id,
            authors,
        },
    )
    .await?;

    let public_input = PublicInputPayload {
        message: message.to_string(),
        public_keys: resolved.keys,
    };
    Ok(MockVerifier::prove(
        &CircuitDescriptor::from(&resolved.circuit),
        &public_input,
    )?)
}

pub async fn run_verify<V: ProofVerifier>(
    args: &VerifyArgs,
    pool: &SqlitePool,
    verifier: &V,
) -> Result<u8> {
    match reverify(pool, verifier, MessageId::new(args.id)).await? {
        Verdict::Accepted(_) => {
            println!("OK: message {} verifies ({})", args.id, verifier.name());
            Ok(0)
        }
        Verdict::Rejected { reason } => {
            println!("FAIL: message {} rejected: {reason}", args.id);
            Ok(1)
        }
    }
}

pub async fn run_prove(args: &ProveArgs, pool: &SqlitePool) -> Result<u8> {
    let user_ids = args.user_ids.iter().copied().map(UserId::new).collect();
    let proof = mock_proof(pool, CircuitId::new(args.circuit_id), &args.message, user_ids).await?;
    println!("{proof}");
    Ok(0)
}
