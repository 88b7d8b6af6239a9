//! # Circuit and User Subcommands
//!
//! Registration goes through the same `register` functions as
//! `POST /circuits` and `POST /users`, so validation and conflict handling
//! are identical. Circuit blobs are large, so they are read from files.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use ringboard_api::db;
use ringboard_api::routes::{circuits, users};
use ringboard_core::{CircuitId, NewCircuit, NewUser};
use sqlx::SqlitePool;

/// Arguments for `ringboard circuit`.
#[derive(Args, Debug)]
pub struct CircuitArgs {
    #[command(subcommand)]
    pub command: CircuitCommand,
}

#[derive(Subcommand, Debug)]
pub enum CircuitCommand {
    /// Register a circuit from its two blob files.
    Add {
        /// Unique circuit name.
        #[arg(long)]
        name: String,
        /// File holding the circuit description.
        #[arg(long)]
        circuit_file: PathBuf,
        /// File holding the verifier parameters.
        #[arg(long)]
        verifier_data_file: PathBuf,
    },
    /// List circuit ids and names.
    List,
    /// Print one circuit, blobs included, as JSON.
    Show {
        #[arg(long)]
        id: i64,
    },
}

/// Arguments for `ringboard user`.
#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a user and their ring public key.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        public_key: String,
    },
    /// List users.
    List,
}

pub async fn run_circuit(args: &CircuitArgs, pool: &SqlitePool) -> Result<u8> {
    match &args.command {
        CircuitCommand::Add {
            name,
            circuit_file,
            verifier_data_file,
        } => {
            let circuit = std::fs::read_to_string(circuit_file)
                .with_context(|| format!("reading {}", circuit_file.display()))?;
            let verifier_circuit_data = std::fs::read_to_string(verifier_data_file)
                .with_context(|| format!("reading {}", verifier_data_file.display()))?;
            let created = circuits::register(
                pool,
                NewCircuit {
                    name: name.clone(),
                    circuit: circuit.trim_end().to_string(),
                    verifier_circuit_data: verifier_circuit_data.trim_end().to_string(),
                },
            )
            .await?;
            println!("OK: registered circuit {} ({})", created.id, created.name);
            Ok(0)
        }
        CircuitCommand::List => {
            for c in db::circuits::list(pool).await? {
                println!("{}\t{}", c.id, c.name);
            }
            Ok(0)
        }
        CircuitCommand::Show { id } => {
            let Some(circuit) = db::circuits::get_by_id(pool, CircuitId::new(*id)).await? else {
                bail!("circuit {id} not found");
            };
            println!("{}", serde_json::to_string_pretty(&circuit)?);
            Ok(0)
        }
    }
}

pub async fn run_user(args: &UserArgs, pool: &SqlitePool) -> Result<u8> {
    match &args.command {
        UserCommand::Add { name, public_key } => {
            let created = users::register(
                pool,
                NewUser {
                    name: name.clone(),
                    public_key: public_key.clone(),
                },
            )
            .await?;
            println!("OK: registered user {} ({})", created.id, created.name);
            Ok(0)
        }
        UserCommand::List => {
            for u in db::users::list(pool).await? {
                println!("{}\t{}\t{}", u.id, u.name, abbreviate(&u.public_key));
            }
            Ok(0)
        }
    }
}

/// Shorten a key for tabular output.
fn abbreviate(key: &str) -> String {
    const SHOWN: usize = 16;
    if key.is_empty() {
        return "(no key)".to_string();
    }
    match key.char_indices().nth(SHOWN) {
        Some((cut, _)) => format!("{}…", &key[..cut]),
        None => key.to_string(),
    }
}
