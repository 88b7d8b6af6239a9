//! # Author Sets
//!
//! The list of user ids a submission claims as its ring. Validated once at
//! construction: non-empty, no duplicates, bounded in size. The submission
//! order is preserved because the persisted message echoes it back; the
//! verifier never sees this order (see [`crate::canonical`]).

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::identity::UserId;

/// Default server-side upper bound on ring size.
///
/// Bounds verifier cost and the public-input size the circuit must accept.
pub const DEFAULT_MAX_AUTHORS: usize = 32;

/// A validated, ordered, duplicate-free list of claimed author ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSet {
    ids: Vec<UserId>,
}

impl AuthorSet {
    /// Validate a claimed author list.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyAuthorSet`] if `ids` is empty.
    /// - [`ValidationError::TooManyAuthors`] if `ids.len() > max`.
    /// - [`ValidationError::DuplicateAuthor`] for the first repeated id.
    pub fn new(ids: Vec<UserId>, max: usize) -> Result<Self, ValidationError> {
        if ids.is_empty() {
            return Err(ValidationError::EmptyAuthorSet);
        }
        if ids.len() > max {
            return Err(ValidationError::TooManyAuthors {
                count: ids.len(),
                max,
            });
        }
        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(*id) {
                return Err(ValidationError::DuplicateAuthor(*id));
            }
        }
        Ok(Self { ids })
    }

    /// Author ids in submission order.
    pub fn ids(&self) -> &[UserId] {
        &self.ids
    }

    /// Number of claimed authors. Never zero.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether `id` is one of the claimed authors.
    pub fn contains(&self, id: UserId) -> bool {
        self.ids.contains(&id)
    }

    /// Consume the set, returning ids in submission order.
    pub fn into_ids(self) -> Vec<UserId> {
        self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<UserId> {
        raw.iter().copied().map(UserId::new).collect()
    }

    #[test]
    fn empty_list_rejected() {
        assert_eq!(
            AuthorSet::new(vec![], DEFAULT_MAX_AUTHORS),
            Err(ValidationError::EmptyAuthorSet)
        );
    }

    #[test]
    fn duplicate_rejected() {
        assert_eq!(
            AuthorSet::new(ids(&[1, 2, 1]), DEFAULT_MAX_AUTHORS),
            Err(ValidationError::DuplicateAuthor(UserId::new(1)))
        );
    }

    #[test]
    fn bound_enforced() {
        let err = AuthorSet::new(ids(&[1, 2, 3]), 2).unwrap_err();
        assert_eq!(err, ValidationError::TooManyAuthors { count: 3, max: 2 });
    }

    #[test]
    fn bound_is_inclusive() {
        assert!(AuthorSet::new(ids(&[1, 2]), 2).is_ok());
    }

    #[test]
    fn submission_order_preserved() {
        let set = AuthorSet::new(ids(&[9, 3, 5]), DEFAULT_MAX_AUTHORS).unwrap();
        assert_eq!(set.ids(), ids(&[9, 3, 5]).as_slice());
        assert_eq!(set.len(), 3);
        assert!(set.contains(UserId::new(3)));
        assert!(!set.contains(UserId::new(4)));
    }
}
