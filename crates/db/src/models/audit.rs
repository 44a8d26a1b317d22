//! Audit log rows.

use sqlx::FromRow;
use tms_core::ticket::AuditEntry;
use tms_core::types::{DbId, Timestamp};

/// A row from the `audit_logs` table.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogRow {
    pub id: DbId,
    pub ticket_id: DbId,
    pub actor_id: Option<DbId>,
    pub action: String,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

impl From<AuditLogRow> for AuditEntry {
    fn from(row: AuditLogRow) -> Self {
        AuditEntry {
            id: row.id,
            ticket_id: row.ticket_id,
            actor_id: row.actor_id,
            action: row.action,
            payload: row.payload,
            created_at: row.created_at,
        }
    }
}
