//! # Error Hierarchy
//!
//! Structured error types for Ringboard, built with `thiserror`.
//!
//! [`BoardError`] is the taxonomy a caller of the submission pipeline or the
//! registries can observe. Its `Display` output is deliberately short: no
//! verifier diagnostics or storage details are carried in the messages that
//! reach a client. Detail belongs in the logs.

use thiserror::Error;

use crate::identity::UserId;

/// Top-level error type for board operations.
#[derive(Error, Debug)]
pub enum BoardError {
    /// A required field is missing, empty, or out of bounds.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced circuit, user or message does not exist.
    #[error("{0} not found")]
    NotFound(Resource),

    /// The operation would violate a uniqueness constraint.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The proof was missing or the verifier did not accept it.
    #[error("{0}")]
    Verification(VerificationFailure),

    /// The store failed to read or commit. The string is for logs only.
    #[error("storage error: {0}")]
    Storage(String),
}

impl BoardError {
    /// Machine-readable error kind, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Verification(_) => "VERIFICATION_FAILED",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// The kind of record a [`BoardError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Circuit,
    User,
    Message,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Circuit => "circuit",
            Self::User => "user",
            Self::Message => "message",
        })
    }
}

/// Why a submission failed the verification gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    /// No proof was supplied; the verifier was never invoked.
    ProofRequired,
    /// The verifier rejected the proof, or could not give a definitive answer.
    Rejected,
}

impl std::fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ProofRequired => "proof required",
            Self::Rejected => "verification failed",
        })
    }
}

/// Validation errors raised before any resolution work begins.
///
/// Each variant names the offending field or bound so a client can correct
/// the request without guesswork.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The submission named no authors.
    #[error("at least one author id is required")]
    EmptyAuthorSet,

    /// The same author id appeared twice in one submission.
    #[error("duplicate author id {0}")]
    DuplicateAuthor(UserId),

    /// The submission named more authors than the server accepts.
    #[error("too many authors: {count} exceeds the limit of {max}")]
    TooManyAuthors {
        /// Number of ids supplied.
        count: usize,
        /// Configured upper bound.
        max: usize,
    },

    /// The request body did not match the expected schema.
    #[error("malformed request: {0}")]
    Malformed(String),
}
