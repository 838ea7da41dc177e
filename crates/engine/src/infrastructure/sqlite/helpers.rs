//! Shared helpers for the SQLite repositories.

use serde::{de::DeserializeOwned, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::RepoError;

pub(super) fn encode<T: Serialize>(value: &T) -> Result<String, RepoError> {
    serde_json::to_string(value).map_err(RepoError::serialization)
}

pub(super) fn decode<T: DeserializeOwned>(row: &SqliteRow) -> Result<T, RepoError> {
    let json: String = row.get("document");
    serde_json::from_str(&json).map_err(RepoError::serialization)
}

pub(super) fn decode_all<T: DeserializeOwned>(rows: &[SqliteRow]) -> Result<Vec<T>, RepoError> {
    rows.iter().map(decode).collect()
}

/// Maps unique-key violations to `ConstraintViolation`, everything else to `Database`.
pub(super) fn map_write_error(operation: &'static str, error: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return RepoError::constraint(db_error.message());
        }
    }
    RepoError::database(operation, error)
}

/// `MAX(id) + 1` for `table`, or 1 when empty.
pub(super) async fn next_id(pool: &SqlitePool, table: &'static str) -> Result<i64, RepoError> {
    let query = format!("SELECT COALESCE(MAX(id), 0) + 1 AS next_id FROM {table}");
    let row = sqlx::query(&query)
        .fetch_one(pool)
        .await
        .map_err(|e| RepoError::database("next_id", e))?;
    Ok(row.get("next_id"))
}
