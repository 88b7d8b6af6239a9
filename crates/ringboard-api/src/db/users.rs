//! User registry persistence.
//!
//! Operates on the `users` table.

use ringboard_core::{NewUser, User, UserId};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

/// Insert a new user and return the stored record.
pub async fn insert(pool: &SqlitePool, new: &NewUser) -> Result<User, sqlx::Error> {
    let result = sqlx::query("INSERT INTO users (name, public_key) VALUES (?1, ?2)")
        .bind(&new.name)
        .bind(&new.public_key)
        .execute(pool)
        .await?;

    Ok(User {
        id: UserId::new(result.last_insert_rowid()),
        name: new.name.clone(),
        public_key: new.public_key.clone(),
    })
}

/// Fetch one user.
pub async fn get_by_id<'e, E>(executor: E, id: UserId) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, UserRow>("SELECT id, name, public_key FROM users WHERE id = ?1")
        .bind(id.get())
        .fetch_optional(executor)
        .await?;

    Ok(row.map(UserRow::into_record))
}

/// Fetch every user whose id is in `ids`. Missing ids are simply absent
/// from the result; order is unspecified.
pub async fn get_many<'e, E>(executor: E, ids: &[UserId]) -> Result<Vec<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, name, public_key FROM users WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(id.get());
    }
    separated.push_unseparated(")");

    let rows = query.build_query_as::<UserRow>().fetch_all(executor).await?;
    Ok(rows.into_iter().map(UserRow::into_record).collect())
}

/// Whether a user with exactly this name and key is already registered.
pub async fn exists(pool: &SqlitePool, new: &NewUser) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM users WHERE name = ?1 AND public_key = ?2 LIMIT 1")
            .bind(&new.name)
            .bind(&new.public_key)
            .fetch_optional(pool)
            .await?;
    Ok(found.is_some())
}

/// List all users.
pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, public_key FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(UserRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    public_key: String,
}

impl UserRow {
    fn into_record(self) -> User {
        User {
            id: UserId::new(self.id),
            name: self.name,
            public_key: self.public_key,
        }
    }
}
