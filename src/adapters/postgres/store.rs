//! Shared helpers of the PostgreSQL adapters.

use sqlx::postgres::PgRow;
use sqlx::{Decode, Postgres, Row, Type};

use crate::domain::foundation::{DomainError, Timestamp};

/// Maps a driver error to a storage failure.
pub(super) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

/// Maps a write error, reporting unique violations as conflicts.
pub(super) fn write_error(context: &str, e: sqlx::Error) -> DomainError {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DomainError::conflict(format!("{}: {}", context, db_err.message()))
        }
        other => db_error(context, other),
    }
}

/// Reads a column, naming it in the error.
pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

pub(super) fn timestamp(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    let at: chrono::DateTime<chrono::Utc> = column(row, name)?;
    Ok(Timestamp::from_datetime(at))
}

/// Counters are stored as BIGINT and never negative.
pub(super) fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
