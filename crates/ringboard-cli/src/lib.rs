//! # ringboard-cli: Administrative CLI for Ringboard
//!
//! Operator tooling that talks to the board database directly, using the
//! same registration and resolution code as the HTTP service.
//!
//! ## Subcommands
//!
//! - `ringboard migrate`: Create or upgrade the database schema.
//! - `ringboard circuit`: Register, list and show circuits.
//! - `ringboard user`: Register and list users.
//! - `ringboard message`: List and show stored messages.
//! - `ringboard seed`: Load circuits and users from a YAML file.
//! - `ringboard verify`: Re-run a stored message through the configured
//!   verifier without writing anything.
//! - `ringboard prove`: Compute the proof the mock verifier accepts.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives next to each handler; `main.rs` only dispatches.
//! - Handlers return `anyhow::Result<u8>`, the process exit code.

pub mod messages;
pub mod registry;
pub mod seed;
pub mod verify;
