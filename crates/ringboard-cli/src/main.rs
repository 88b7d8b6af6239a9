//! # ringboard CLI entry point
//!
//! Parses arguments, opens the database and dispatches to the handler
//! modules in `ringboard_cli`.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ringboard_api::config::{AppConfig, DEFAULT_DATABASE_URL};
use ringboard_api::db;
use ringboard_cli::messages::{run_message, MessageArgs};
use ringboard_cli::registry::{run_circuit, run_user, CircuitArgs, UserArgs};
use ringboard_cli::seed::{run_seed, SeedArgs};
use ringboard_cli::verify::{run_prove, run_verify, ProveArgs, VerifyArgs};

/// Ringboard administrative CLI.
///
/// Manages the circuit and user registries, inspects the message board and
/// re-verifies stored proofs. Operates on the database directly.
#[derive(Parser, Debug)]
#[command(name = "ringboard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// SQLx SQLite connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL, global = true)]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database if needed and apply migrations.
    Migrate,

    /// Circuit registry (add, list, show).
    Circuit(CircuitArgs),

    /// User registry (add, list).
    User(UserArgs),

    /// Inspect stored messages (list, show).
    Message(MessageArgs),

    /// Load circuits and users from a YAML file.
    Seed(SeedArgs),

    /// Re-run a stored message through the configured verifier.
    Verify(VerifyArgs),

    /// Compute the proof the mock verifier accepts for a statement.
    Prove(ProveArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<u8> {
    let pool = db::init_pool(&cli.database_url).await?;

    match cli.command {
        Commands::Migrate => {
            println!("OK: database at {} is up to date", cli.database_url);
            Ok(0)
        }
        Commands::Circuit(args) => run_circuit(&args, &pool).await,
        Commands::User(args) => run_user(&args, &pool).await,
        Commands::Message(args) => run_message(&args, &pool).await,
        Commands::Seed(args) => run_seed(&args, &pool).await,
        Commands::Verify(args) => {
            let verifier = AppConfig::from_env()?.verifier_backend();
            run_verify(&args, &pool, &verifier).await
        }
        Commands::Prove(args) => run_prove(&args, &pool).await,
    }
}
