//! Aggregate query rows for rankings and dashboard counts.

use std::collections::BTreeMap;

use sqlx::FromRow;
use tms_core::error::StoreError;
use tms_core::metrics::UserRanking;
use tms_core::roles::Role;
use tms_core::types::DbId;

use super::parse_column;

#[derive(Debug, Clone, FromRow)]
pub struct RankingRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub total_points: f64,
    pub tickets_completed: i64,
    pub rank: i64,
}

impl TryFrom<RankingRow> for UserRanking {
    type Error = StoreError;

    fn try_from(row: RankingRow) -> Result<Self, Self::Error> {
        Ok(UserRanking {
            id: row.id,
            name: row.name,
            email: row.email,
            role: parse_column::<Role>("users.role", &row.role)?,
            total_points: row.total_points,
            tickets_completed: row.tickets_completed,
            rank: row.rank,
        })
    }
}

/// One `(key, count)` pair from a `GROUP BY` query.
#[derive(Debug, Clone, FromRow)]
pub struct CountRow {
    pub key: String,
    pub count: i64,
}

pub fn into_count_map(rows: Vec<CountRow>) -> BTreeMap<String, i64> {
    rows.into_iter().map(|r| (r.key, r.count)).collect()
}
