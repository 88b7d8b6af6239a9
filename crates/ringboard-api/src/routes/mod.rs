//! # API Route Modules
//!
//! - `messages`: proof-gated submission and the message feed.
//! - `circuits`: circuit registration and lookup. Listings omit the blobs.
//! - `users`: user registration and lookup.
//!
//! Registration is unauthenticated; operators are expected to put the
//! service behind whatever access control their deployment uses.

pub mod circuits;
pub mod messages;
pub mod users;
