//! Row structs for each table and their conversion into domain types.
//!
//! Enum columns are stored as text; a value outside the known set maps to
//! [`StoreError::Corrupt`](tms_core::error::StoreError::Corrupt).

pub mod audit;
pub mod comment;
pub mod metrics;
pub mod ticket;
pub mod user;
pub mod user_score;

use std::str::FromStr;

use tms_core::error::StoreError;

/// Parse a text column into one of the core enums.
pub(crate) fn parse_column<T>(column: &str, value: &str) -> Result<T, StoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| StoreError::Corrupt(format!("{column}: {e}")))
}
