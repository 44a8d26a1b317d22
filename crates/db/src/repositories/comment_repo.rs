//! Repository for the `comments` table.

use sqlx::PgPool;
use tms_core::ticket::Comment;
use tms_core::types::DbId;

use crate::models::comment::CommentRow;

const COLUMNS: &str = "id, ticket_id, author_id, body, is_system_generated, created_at";

pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(pool: &PgPool, comment: &Comment) -> Result<CommentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (id, ticket_id, author_id, body, is_system_generated, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(comment.id)
            .bind(comment.ticket_id)
            .bind(comment.author_id)
            .bind(&comment.body)
            .bind(comment.is_system_generated)
            .bind(comment.created_at)
            .fetch_one(pool)
            .await
    }

    /// Comments on a ticket, oldest first.
    pub async fn list_for_ticket(
        pool: &PgPool,
        ticket_id: DbId,
    ) -> Result<Vec<CommentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments WHERE ticket_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(ticket_id)
            .fetch_all(pool)
            .await
    }
}
