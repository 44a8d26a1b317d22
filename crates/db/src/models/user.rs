//! User rows.

use sqlx::FromRow;
use tms_core::error::StoreError;
use tms_core::roles::Role;
use tms_core::ticket::UserSummary;
use tms_core::types::DbId;

use super::parse_column;

/// A row from the `users` table (or a join projecting the same columns).
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl TryFrom<UserRow> for UserSummary {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserSummary {
            id: row.id,
            name: row.name,
            email: row.email,
            role: parse_column::<Role>("users.role", &row.role)?,
        })
    }
}
