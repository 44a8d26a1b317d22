//! Structured audit log: action names, payload redaction and entry
//! construction.

use chrono::Utc;

use crate::roles::Actor;
use crate::ticket::AuditEntry;
use crate::types::DbId;

/// Action names recorded in the audit log.
pub mod actions {
    pub const CREATE_TICKET: &str = "create_ticket";
    pub const UPDATE_TICKET: &str = "update_ticket";
    pub const UPDATE_TICKET_FIELDS: &str = "update_ticket_fields";
    pub const CLASSIFY: &str = "classify";
    pub const STATUS_CHANGE: &str = "status_change";
    pub const ASSIGN: &str = "assign";
    pub const UNASSIGN: &str = "unassign";
    pub const ADD_COMMENT: &str = "add_comment";
    pub const UPDATE_ASSESSMENT: &str = "update_assessment";

    pub const ALL: &[&str] = &[
        CREATE_TICKET,
        UPDATE_TICKET,
        UPDATE_TICKET_FIELDS,
        CLASSIFY,
        STATUS_CHANGE,
        ASSIGN,
        UNASSIGN,
        ADD_COMMENT,
        UPDATE_ASSESSMENT,
    ];
}

/// Key fragments whose values never reach the audit log.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "api_key",
    "private_key",
    "authorization",
    "credential",
];

const REDACTED: &str = "[REDACTED]";

/// Replace the value of any key containing a [`SENSITIVE_FIELDS`] fragment
/// (case-insensitive), at any depth.
pub fn redact_sensitive_fields(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(key, val)| {
                    let lower = key.to_lowercase();
                    let val = if SENSITIVE_FIELDS.iter().any(|f| lower.contains(f)) {
                        serde_json::Value::String(REDACTED.to_string())
                    } else {
                        redact_sensitive_fields(val)
                    };
                    (key.clone(), val)
                })
                .collect(),
        ),
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(redact_sensitive_fields).collect())
        }
        other => other.clone(),
    }
}

/// A ready-to-store entry with its payload already redacted.
pub fn entry(
    ticket_id: DbId,
    actor: &Actor,
    action: &str,
    payload: &serde_json::Value,
) -> AuditEntry {
    AuditEntry {
        id: uuid::Uuid::now_v7(),
        ticket_id,
        actor_id: actor.id,
        action: action.to_string(),
        payload: redact_sensitive_fields(payload),
        created_at: Utc::now(),
    }
}
