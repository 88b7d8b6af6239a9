//! # ringboard-zkp: Verifier Boundary
//!
//! Ringboard never checks ring proofs itself. It packages a submission into
//! the three payloads an external verifier understands, hands them over, and
//! interprets the answer strictly.
//!
//! ## Architecture
//!
//! - **Payloads** (`payload.rs`): `CircuitDescriptor`, `ProofPayload` and
//!   `PublicInputPayload`, with the field names the verifier reads.
//!
//! - **Traits** (`traits.rs`): the sealed `ProofVerifier` trait and the
//!   `Verdict` it returns. Only an `Accepted` verdict carries an
//!   [`Acceptance`], and only verifiers in this crate can mint one.
//!
//! - **External** (`external.rs`): runs the configured verifier binary with
//!   per-call temporary files and a deadline.
//!
//! - **Mock** (`mock.rs`, feature `mock`): deterministic SHA-256 "proofs"
//!   over the JCS-canonical statement. Transparent, no privacy. For local
//!   development and tests only.
//!
//! - **Backend** (`backend.rs`): the closed set of verifiers a service can be
//!   configured with, plus logging and metrics around every invocation.
//!
//! ## Fail-Closed Contract
//!
//! Anything short of an exact success signal is a rejection. Callers should
//! treat `Err(VerifyError)` exactly like `Ok(Verdict::Rejected { .. })`.

pub mod backend;
pub mod external;
#[cfg(feature = "mock")]
pub mod mock;
pub mod payload;
pub mod traits;

pub use backend::VerifierBackend;
pub use external::{ExternalVerifier, ExternalVerifierConfig, SUCCESS_MARKER};
#[cfg(feature = "mock")]
pub use mock::MockVerifier;
pub use payload::{CircuitDescriptor, ProofPayload, PublicInputPayload, VerificationRequest};
pub use traits::{Acceptance, ProofVerifier, Verdict, VerifyError};
