//! # Proof Verifier Trait
//!
//! The abstract interface every verifier backend satisfies.
//!
//! ## Security Invariant
//!
//! The trait is sealed. Only backends in this crate can implement it, and
//! only they can construct an [`Acceptance`]. Code elsewhere in the
//! workspace that holds an `Acceptance` therefore knows a verifier in this
//! crate said yes.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::payload::VerificationRequest;

/// Proof that a verifier accepted a request.
///
/// Has no public constructor.
#[derive(Debug)]
pub struct Acceptance {
    _sealed: (),
}

impl Acceptance {
    pub(crate) fn new() -> Self {
        Self { _sealed: () }
    }
}

/// A definitive answer from a verifier.
#[derive(Debug)]
pub enum Verdict {
    Accepted(Acceptance),
    /// The verifier answered, and the answer was not an exact success.
    /// `reason` is diagnostic text for logs only.
    Rejected { reason: String },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub(crate) fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

/// The verifier could not produce an answer at all.
///
/// Fail-closed: callers treat every variant as a rejection.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Per-call artifacts could not be created or written.
    #[error("verifier artifact error: {0}")]
    Artifact(std::io::Error),

    /// The verifier binary could not be started.
    #[error("failed to spawn verifier: {0}")]
    Spawn(std::io::Error),

    /// The verifier's output could not be collected.
    #[error("verifier I/O error: {0}")]
    Io(std::io::Error),

    /// The verifier did not finish before its deadline and was killed.
    #[error("verifier timed out after {0:?}")]
    Timeout(Duration),

    /// A payload could not be encoded.
    #[error("payload encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A backend that can decide whether a proof is valid for a request.
pub trait ProofVerifier: private::Sealed + Send + Sync {
    /// Short stable name, used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Decide on one request.
    fn verify(
        &self,
        request: &VerificationRequest,
    ) -> impl Future<Output = Result<Verdict, VerifyError>> + Send;
}

mod private {
    pub trait Sealed {}
    impl Sealed for crate::external::ExternalVerifier {}
    #[cfg(feature = "mock")]
    impl Sealed for crate::mock::MockVerifier {}
    impl Sealed for crate::backend::VerifierBackend {}
}
