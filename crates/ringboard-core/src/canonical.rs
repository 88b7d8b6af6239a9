//! # Canonical Public-Key Sequence
//!
//! The verifier's decision depends on the exact bytes of its public input, so
//! the ring must be presented in one order regardless of how a client listed
//! the authors. `CanonicalKeys` is the only type the verification layer
//! accepts for that input.
//!
//! ## Invariants
//!
//! - Empty keys (legacy accounts) are excluded.
//! - Remaining keys are sorted ascending by byte value.
//! - The inner `Vec` is private; the constructors are the only way in.
//!
//! Resolution is all-or-nothing: if any claimed author is missing from the
//! resolved users, no sequence is produced.

use std::collections::HashMap;

use serde::Serialize;

use crate::authors::AuthorSet;
use crate::domain::User;
use crate::error::{BoardError, Resource};
use crate::identity::UserId;

/// Sorted, empty-free list of author public keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalKeys(Vec<String>);

impl CanonicalKeys {
    /// Build the canonical sequence from raw keys in any order.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys: Vec<String> = keys
            .into_iter()
            .map(Into::into)
            .filter(|k| !k.is_empty())
            .collect();
        keys.sort_unstable();
        Self(keys)
    }

    /// Resolve every claimed author against the users fetched from the
    /// registry and build the canonical sequence from their keys.
    ///
    /// `users` may arrive in any order and may contain users that were not
    /// claimed; those are ignored.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] with [`Resource::User`] if any claimed id has
    /// no matching user.
    pub fn resolve(authors: &AuthorSet, users: &[User]) -> Result<Self, BoardError> {
        let by_id: HashMap<UserId, &User> = users.iter().map(|u| (u.id, u)).collect();
        let mut keys = Vec::with_capacity(authors.len());
        for id in authors.ids() {
            match by_id.get(id) {
                Some(user) => keys.push(user.public_key.as_str()),
                None => return Err(BoardError::NotFound(Resource::User)),
            }
        }
        Ok(Self::from_keys(keys))
    }

    /// The keys in canonical order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of non-empty keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when every resolved author was keyless.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
