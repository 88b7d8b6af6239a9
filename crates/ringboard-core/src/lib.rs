//! # ringboard-core: Foundational Types for Ringboard
//!
//! Ringboard is a bulletin board that accepts a post only when it carries a
//! ring-signature proof that its author is one of a declared set of
//! registered users. This crate holds the pure, I/O-free part of that
//! contract. Every other crate in the workspace depends on it; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for row identifiers.** `CircuitId`, `UserId` and
//!    `MessageId` are distinct types. A user id cannot be passed where a
//!    circuit id is expected.
//!
//! 2. **`AuthorSet` is validated at construction.** Empty lists, duplicate
//!    ids and oversize rings are rejected before any storage work begins.
//!
//! 3. **`CanonicalKeys` is the only verifier input ordering.** Keys are
//!    filtered and sorted inside the constructor, so two submissions naming
//!    the same authors in different orders produce identical bytes.
//!
//! 4. **One error taxonomy.** [`BoardError`] carries exactly the five kinds
//!    the submission pipeline can surface to a caller.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ringboard-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod authors;
pub mod canonical;
pub mod domain;
pub mod error;
pub mod identity;

// Re-export primary types for ergonomic imports.
pub use authors::{AuthorSet, DEFAULT_MAX_AUTHORS};
pub use canonical::CanonicalKeys;
pub use domain::{Circuit, CircuitSummary, Message, NewCircuit, NewUser, User};
pub use error::{BoardError, Resource, ValidationError, VerificationFailure};
pub use identity::{CircuitId, MessageId, UserId};
