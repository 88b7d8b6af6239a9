//! Message store persistence.
//!
//! Operates on the `messages` and `message_users` tables. The two insert
//! functions take a bare connection so they can only be composed inside a
//! caller-owned transaction; nothing in this module commits.
//!
//! Author rows carry their position in the submitted list, so reads return
//! `userIds` in the order the author was claimed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ringboard_core::{CircuitId, Message, MessageId, UserId};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

/// Insert the message row. Must run inside the submission transaction.
pub async fn insert_message(
    conn: &mut SqliteConnection,
    message: &str,
    proof: &str,
    circuit_id: CircuitId,
    timestamp: DateTime<Utc>,
) -> Result<MessageId, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO messages (message, timestamp, proof, circuit_id) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(message)
    .bind(timestamp)
    .bind(proof)
    .bind(circuit_id.get())
    .execute(&mut *conn)
    .await?;

    Ok(MessageId::new(result.last_insert_rowid()))
}

/// Insert one author row. Must run inside the submission transaction.
pub async fn insert_author(
    conn: &mut SqliteConnection,
    message_id: MessageId,
    user_id: UserId,
    position: usize,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO message_users (message_id, user_id, position) VALUES (?1, ?2, ?3)")
        .bind(message_id.get())
        .bind(user_id.get())
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Fetch one message with its authors.
pub async fn get_by_id(pool: &SqlitePool, id: MessageId) -> Result<Option<Message>, sqlx::Error> {
    let row = sqlx::query_as::<_, MessageRow>(
        "SELECT id, message, timestamp, proof, circuit_id FROM messages WHERE id = ?1",
    )
    .bind(id.get())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut authors = authors_for(pool, &[row.id]).await?;
    let user_ids = authors.remove(&row.id).unwrap_or_default();
    Ok(Some(row.into_record(user_ids)))
}

/// List messages newest first, with id as tie-break.
///
/// `limit = None` returns every message from `offset` on.
pub async fn list(
    pool: &SqlitePool,
    limit: Option<i64>,
    offset: i64,
) -> Result<Vec<Message>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MessageRow>(
        "SELECT id, message, timestamp, proof, circuit_id FROM messages
         ORDER BY timestamp DESC, id DESC LIMIT ?1 OFFSET ?2",
    )
    .bind(limit.unwrap_or(-1))
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut authors = authors_for(pool, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let user_ids = authors.remove(&row.id).unwrap_or_default();
            row.into_record(user_ids)
        })
        .collect())
}

/// Number of persisted messages.
pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(pool)
        .await
}

/// Author ids per message, each list in submitted order.
async fn authors_for(
    pool: &SqlitePool,
    message_ids: &[i64],
) -> Result<HashMap<i64, Vec<UserId>>, sqlx::Error> {
    let mut grouped: HashMap<i64, Vec<UserId>> = HashMap::new();
    if message_ids.is_empty() {
        return Ok(grouped);
    }

    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT message_id, user_id FROM message_users WHERE message_id IN (");
    let mut separated = query.separated(", ");
    for id in message_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY message_id, position");

    let rows = query.build_query_as::<AuthorRow>().fetch_all(pool).await?;
    for row in rows {
        grouped
            .entry(row.message_id)
            .or_default()
            .push(UserId::new(row.user_id));
    }
    Ok(grouped)
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: i64,
    message: String,
    timestamp: DateTime<Utc>,
    proof: String,
    circuit_id: i64,
}

impl MessageRow {
    fn into_record(self, user_ids: Vec<UserId>) -> Message {
        Message {
            id: MessageId::new(self.id),
            message: self.message,
            timestamp: self.timestamp,
            proof: self.proof,
            circuit_id: CircuitId::new(self.circuit_id),
            user_ids,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    message_id: i64,
    user_id: i64,
}
