//! Repository for the `audit_logs` table.

use sqlx::PgPool;
use tms_core::ticket::AuditEntry;
use tms_core::types::DbId;

use crate::models::audit::AuditLogRow;

const COLUMNS: &str = "id, ticket_id, actor_id, action, payload, created_at";

pub struct AuditLogRepo;

impl AuditLogRepo {
    pub async fn insert(pool: &PgPool, entry: &AuditEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO audit_logs (id, ticket_id, actor_id, action, payload, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(entry.id)
        .bind(entry.ticket_id)
        .bind(entry.actor_id)
        .bind(&entry.action)
        .bind(&entry.payload)
        .bind(entry.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Entries for one ticket, oldest first.
    pub async fn list_for_ticket(
        pool: &PgPool,
        ticket_id: DbId,
    ) -> Result<Vec<AuditLogRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs WHERE ticket_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, AuditLogRow>(&query)
            .bind(ticket_id)
            .fetch_all(pool)
            .await
    }
}
