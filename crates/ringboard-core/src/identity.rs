//! # Row Identifier Newtypes
//!
//! The store assigns 64-bit integer keys to circuits, users and messages.
//! Each namespace gets its own newtype so a `UserId` can never be bound
//! where a `CircuitId` is expected.
//!
//! All three serialize transparently as JSON integers, matching the board
//! client's `_id: number` fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a registered verification circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircuitId(i64);

/// Identifier of a registered user (ring member).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Identifier of a persisted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl CircuitId {
    /// Wrap a raw row id.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw row id for binding into queries.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl UserId {
    /// Wrap a raw row id.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw row id for binding into queries.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl MessageId {
    /// Wrap a raw row id.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw row id for binding into queries.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CircuitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
