//! Point distribution rows.

use sqlx::FromRow;
use tms_core::ticket::UserScore;
use tms_core::types::{DbId, Timestamp};

/// A row from the `user_scores` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserScoreRow {
    pub user_id: DbId,
    pub ticket_id: DbId,
    pub points: f64,
    pub awarded_at: Timestamp,
}

impl From<UserScoreRow> for UserScore {
    fn from(row: UserScoreRow) -> Self {
        UserScore {
            user_id: row.user_id,
            ticket_id: row.ticket_id,
            points: row.points,
            awarded_at: row.awarded_at,
        }
    }
}
