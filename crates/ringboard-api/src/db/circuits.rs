//! Circuit registry persistence.
//!
//! Operates on the `circuits` table. Names are unique at the schema level;
//! a duplicate insert surfaces as a UNIQUE violation for the caller to map.

use ringboard_core::{Circuit, CircuitId, CircuitSummary, NewCircuit};
use sqlx::{SqliteExecutor, SqlitePool};

/// Insert a new circuit and return the stored record.
pub async fn insert(pool: &SqlitePool, new: &NewCircuit) -> Result<Circuit, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO circuits (name, circuit, verifier_circuit_data) VALUES (?1, ?2, ?3)",
    )
    .bind(&new.name)
    .bind(&new.circuit)
    .bind(&new.verifier_circuit_data)
    .execute(pool)
    .await?;

    Ok(Circuit {
        id: CircuitId::new(result.last_insert_rowid()),
        name: new.name.clone(),
        circuit: new.circuit.clone(),
        verifier_circuit_data: new.verifier_circuit_data.clone(),
    })
}

/// Fetch a full circuit record, blobs included.
pub async fn get_by_id<'e, E>(executor: E, id: CircuitId) -> Result<Option<Circuit>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, CircuitRow>(
        "SELECT id, name, circuit, verifier_circuit_data FROM circuits WHERE id = ?1",
    )
    .bind(id.get())
    .fetch_optional(executor)
    .await?;

    Ok(row.map(CircuitRow::into_record))
}

/// Fetch a full circuit record by its unique name.
pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Circuit>, sqlx::Error> {
    let row = sqlx::query_as::<_, CircuitRow>(
        "SELECT id, name, circuit, verifier_circuit_data FROM circuits WHERE name = ?1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(CircuitRow::into_record))
}

/// List all circuits, id and name only.
pub async fn list(pool: &SqlitePool) -> Result<Vec<CircuitSummary>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SummaryRow>("SELECT id, name FROM circuits ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| CircuitSummary {
            id: CircuitId::new(r.id),
            name: r.name,
        })
        .collect())
}

#[derive(sqlx::FromRow)]
struct CircuitRow {
    id: i64,
    name: String,
    circuit: String,
    verifier_circuit_data: String,
}

impl CircuitRow {
    fn into_record(self) -> Circuit {
        Circuit {
            id: CircuitId::new(self.id),
            name: self.name,
            circuit: self.circuit,
            verifier_circuit_data: self.verifier_circuit_data,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    name: String,
}
