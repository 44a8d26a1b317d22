//! Mapping from `sqlx` failures to the store error the engine understands.

use tms_core::error::StoreError;

/// Postgres SQLSTATE for a unique-constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for a foreign-key violation.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

pub fn map_sqlx(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) | Some(FOREIGN_KEY_VIOLATION) => {
                let detail = db_err
                    .constraint()
                    .map(str::to_string)
                    .unwrap_or_else(|| db_err.message().to_string());
                return StoreError::Conflict(detail);
            }
            _ => {}
        }
    }
    if let sqlx::Error::ColumnDecode { index, source } = &err {
        return StoreError::Corrupt(format!("column {index}: {source}"));
    }
    StoreError::Backend(Box::new(err))
}
