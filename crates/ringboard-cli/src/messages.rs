//! # Message Subcommand
//!
//! Read-only views of the message store. Messages can only be created
//! through the submission pipeline.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use ringboard_api::db;
use ringboard_core::{Message, MessageId};
use sqlx::SqlitePool;

#[derive(Args, Debug)]
pub struct MessageArgs {
    #[command(subcommand)]
    pub command: MessageCommand,
}

#[derive(Subcommand, Debug)]
pub enum MessageCommand {
    /// List messages, newest first.
    List {
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },
    /// Print one message as JSON.
    Show {
        #[arg(long)]
        id: i64,
    },
}

pub async fn run_message(args: &MessageArgs, pool: &SqlitePool) -> Result<u8> {
    match &args.command {
        MessageCommand::List { limit, offset } => {
            if *offset < 0 {
                bail!("--offset must not be negative");
            }
            for m in db::messages::list(pool, *limit, *offset).await? {
                println!("{}", summary_line(&m));
            }
            Ok(0)
        }
        MessageCommand::Show { id } => {
            let Some(message) = db::messages::get_by_id(pool, MessageId::new(*id)).await? else {
                bail!("message {id} not found");
            };
            println!("{}", serde_json::to_string_pretty(&message)?);
            Ok(0)
        }
    }
}

fn summary_line(m: &Message) -> String {
    let authors: Vec<String> = m.user_ids.iter().map(ToString::to_string).collect();
    format!(
        "{}\t{}\tcircuit={}\tauthors=[{}]\t{}",
        m.id,
        m.timestamp.to_rfc3339(),
        m.circuit_id,
        authors.join(","),
        m.message
    )
}
