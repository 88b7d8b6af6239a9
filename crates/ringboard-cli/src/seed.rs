//! # Seed Subcommand
//!
//! Loads circuits and users from a YAML file:
//!
//! ```yaml
//! circuits:
//!   - name: ring-v1
//!     circuit: "..."
//!     verifier_circuit_data: "..."
//! users:
//!   - name: Sarah Johnson
//!     public_key: "..."
//! ```
//!
//! Seeding is idempotent. A circuit whose name is taken and a user whose
//! name and key are both already present are skipped.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use ringboard_api::db;
use ringboard_api::routes::{circuits, users};
use ringboard_core::{BoardError, NewCircuit, NewUser};
use serde::Deserialize;
use sqlx::SqlitePool;

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Path to the seed YAML file.
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
    #[serde(default)]
    pub circuits: Vec<NewCircuit>,
    #[serde(default)]
    pub users: Vec<NewUser>,
}

/// What a seed run changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub circuits_added: usize,
    pub circuits_skipped: usize,
    pub users_added: usize,
    pub users_skipped: usize,
}

pub fn parse(yaml: &str) -> Result<SeedFile> {
    Ok(serde_yaml::from_str(yaml)?)
}

pub fn load(path: &Path) -> Result<SeedFile> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse(&content).with_context(|| format!("parsing {}", path.display()))
}

pub async fn apply(pool: &SqlitePool, seed: SeedFile) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for circuit in seed.circuits {
        let name = circuit.name.clone();
        match circuits::register(pool, circuit).await {
            Ok(_) => report.circuits_added += 1,
            Err(BoardError::Conflict(_)) => {
                tracing::info!(%name, "circuit already registered, skipping");
                report.circuits_skipped += 1;
            }
            Err(e) => return Err(e).with_context(|| format!("seeding circuit {name:?}")),
        }
    }

    for user in seed.users {
        if db::users::exists(pool, &user).await? {
            report.users_skipped += 1;
            continue;
        }
        let name = user.name.clone();
        users::register(pool, user)
            .await
            .with_context(|| format!("seeding user {name:?}"))?;
        report.users_added += 1;
    }

    Ok(report)
}

pub async fn run_seed(args: &SeedArgs, pool: &SqlitePool) -> Result<u8> {
    let seed = load(&args.file)?;
    let report = apply(pool, seed).await?;
    println!(
        "OK: circuits +{} ({} skipped), users +{} ({} skipped)",
        report.circuits_added, report.circuits_skipped, report.users_added, report.users_skipped
    );
    Ok(0)
}
