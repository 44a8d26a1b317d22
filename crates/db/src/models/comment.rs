//! Comment rows.

use sqlx::FromRow;
use tms_core::ticket::Comment;
use tms_core::types::{DbId, Timestamp};

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: DbId,
    pub ticket_id: DbId,
    pub author_id: Option<DbId>,
    pub body: String,
    pub is_system_generated: bool,
    pub created_at: Timestamp,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            ticket_id: row.ticket_id,
            author_id: row.author_id,
            body: row.body,
            is_system_generated: row.is_system_generated,
            created_at: row.created_at,
        }
    }
}
