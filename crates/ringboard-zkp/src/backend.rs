//! # Verifier Backend Selection
//!
//! `ProofVerifier` uses return-position `impl Future`, so it cannot be a
//! trait object. A service picks its verifier from this closed enum instead.
//!
//! Every call through the backend gets a `verification_id`, a tracing span,
//! an invocation counter and a duration histogram. Verifier diagnostics stop
//! here; they are logged and never handed back to a client.

use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::external::ExternalVerifier;
#[cfg(feature = "mock")]
use crate::mock::MockVerifier;
use crate::payload::VerificationRequest;
use crate::traits::{ProofVerifier, Verdict, VerifyError};

/// The configured verifier.
#[derive(Debug, Clone)]
pub enum VerifierBackend {
    External(ExternalVerifier),
    #[cfg(feature = "mock")]
    Mock(MockVerifier),
}

impl VerifierBackend {
    async fn dispatch(&self, request: &VerificationRequest) -> Result<Verdict, VerifyError> {
        match self {
            Self::External(v) => v.verify(request).await,
            #[cfg(feature = "mock")]
            Self::Mock(v) => v.verify(request).await,
        }
    }
}

impl ProofVerifier for VerifierBackend {
    fn name(&self) -> &'static str {
        match self {
            Self::External(v) => v.name(),
            #[cfg(feature = "mock")]
            Self::Mock(v) => v.name(),
        }
    }

    async fn verify(&self, request: &VerificationRequest) -> Result<Verdict, VerifyError> {
        let verification_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "verify",
            %verification_id,
            backend = self.name(),
            ring_size = request.ring_size(),
        );

        async {
            let started = Instant::now();
            let result = self.dispatch(request).await;
            metrics::histogram!("ringboard_verifier_duration_seconds")
                .record(started.elapsed().as_secs_f64());

            let label = match &result {
                Ok(Verdict::Accepted(_)) => {
                    tracing::debug!("verifier accepted proof");
                    "accepted"
                }
                Ok(Verdict::Rejected { reason }) => {
                    tracing::warn!(%reason, "verifier rejected proof");
                    "rejected"
                }
                Err(e) => {
                    tracing::warn!(error = %e, "verifier failed to answer");
                    "error"
                }
            };
            metrics::counter!("ringboard_verifier_invocations_total", "result" => label)
                .increment(1);
            result
        }
        .instrument(span)
        .await
    }
}
