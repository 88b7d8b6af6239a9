//! # Mock Verifier
//!
//! A deterministic, transparent verifier for development and testing.
//!
//! ## How It Works
//!
//! - The *statement* is the circuit descriptor plus the public input, i.e.
//!   the request without its proof.
//! - `prove()` returns `hex(SHA256(JCS(statement)))`.
//! - `verify()` recomputes that digest and accepts iff the submitted proof
//!   equals it.
//!
//! Reordering the authors does not change the statement because
//! `public_keys` is already canonical.
//!
//! ## Security Warning
//!
//! **NOT PRIVATE, NOT SOUND.** Anyone can compute a valid mock proof for any
//! ring. Never configure this backend for a deployment that matters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::payload::{CircuitDescriptor, PublicInputPayload, VerificationRequest};
use crate::traits::{Acceptance, ProofVerifier, Verdict, VerifyError};

#[derive(Serialize)]
struct Statement<'a> {
    circuit: &'a CircuitDescriptor,
    public_input: &'a PublicInputPayload,
}

/// Deterministic SHA-256 verifier.
///
/// Clones share one invocation counter, so a test can keep a clone and
/// observe calls made through a backend.
#[derive(Debug, Clone, Default)]
pub struct MockVerifier {
    invocations: Arc<AtomicUsize>,
}

impl MockVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the proof this verifier accepts for a statement.
    pub fn prove(
        circuit: &CircuitDescriptor,
        public_input: &PublicInputPayload,
    ) -> Result<String, VerifyError> {
        let canonical = serde_jcs::to_vec(&Statement {
            circuit,
            public_input,
        })?;
        let digest = Sha256::digest(&canonical);
        Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// How many times `verify` has run across all clones.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl ProofVerifier for MockVerifier {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn verify(&self, request: &VerificationRequest) -> Result<Verdict, VerifyError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        let expected = Self::prove(&request.circuit, &request.public_input)?;
        if request.proof.proof == expected {
            Ok(Verdict::Accepted(Acceptance::new()))
        } else {
            Ok(Verdict::rejected("mock digest mismatch"))
        }
    }
}
