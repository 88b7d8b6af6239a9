//! # Verifier Payloads
//!
//! Three independent, self-describing JSON documents. The field names are
//! fixed by the verifier and must not change:
//!
//! ```text
//! circuit:      { "verifier_circuit_data": "...", "circuit": "..." }
//! proof:        { "proof": "..." }
//! public input: { "message": "...", "public_keys": ["...", ...] }
//! ```
//!
//! `public_keys` is a [`CanonicalKeys`], so the order is fixed before the
//! payload exists.

use ringboard_core::{CanonicalKeys, Circuit};
use serde::Serialize;

/// The circuit's opaque verifier parameters and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitDescriptor {
    pub verifier_circuit_data: String,
    pub circuit: String,
}

impl From<&Circuit> for CircuitDescriptor {
    fn from(c: &Circuit) -> Self {
        Self {
            verifier_circuit_data: c.verifier_circuit_data.clone(),
            circuit: c.circuit.clone(),
        }
    }
}

/// The submitted proof blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProofPayload {
    pub proof: String,
}

/// What the proof claims to be about: the message and the ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicInputPayload {
    pub message: String,
    pub public_keys: CanonicalKeys,
}

/// Everything a verifier needs for one decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationRequest {
    pub circuit: CircuitDescriptor,
    pub proof: ProofPayload,
    pub public_input: PublicInputPayload,
}

impl VerificationRequest {
    pub fn new(
        circuit: CircuitDescriptor,
        proof: impl Into<String>,
        message: impl Into<String>,
        public_keys: CanonicalKeys,
    ) -> Self {
        Self {
            circuit,
            proof: ProofPayload {
                proof: proof.into(),
            },
            public_input: PublicInputPayload {
                message: message.into(),
                public_keys,
            },
        }
    }

    /// Number of keys in the ring as the verifier will see it.
    pub fn ring_size(&self) -> usize {
        self.public_input.public_keys.len()
    }
}
