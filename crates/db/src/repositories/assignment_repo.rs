//! Repository for the `ticket_assignments` junction table.

use sqlx::PgPool;
use tms_core::ticket::Assignment;
use tms_core::types::DbId;

use crate::models::user::UserRow;

pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert the assignment unless it already exists.
    ///
    /// Returns `true` if a row was added.
    pub async fn insert_if_absent(pool: &PgPool, a: &Assignment) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO ticket_assignments (ticket_id, assignee_id, assigned_at, assigned_by) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (ticket_id, assignee_id) DO NOTHING",
        )
        .bind(a.ticket_id)
        .bind(a.assignee_id)
        .bind(a.assigned_at)
        .bind(a.assigned_by)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        ticket_id: DbId,
        assignee_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM ticket_assignments WHERE ticket_id = $1 AND assignee_id = $2",
        )
        .bind(ticket_id)
        .bind(assignee_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Users assigned to the ticket, in assignment order.
    pub async fn list_assignees(pool: &PgPool, ticket_id: DbId) -> Result<Vec<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.name, u.email, u.role \
             FROM ticket_assignments ta \
             JOIN users u ON u.id = ta.assignee_id \
             WHERE ta.ticket_id = $1 \
             ORDER BY ta.assigned_at ASC, u.name ASC",
        )
        .bind(ticket_id)
        .fetch_all(pool)
        .await
    }
}
