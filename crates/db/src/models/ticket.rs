//! Ticket rows.

use sqlx::FromRow;
use tms_core::error::StoreError;
use tms_core::ticket::{Details, InitialType, Priority, ResolvedType, Ticket, TicketStatus};
use tms_core::types::{DbId, Timestamp};

use super::parse_column;

/// A row from the `tickets` table.
#[derive(Debug, Clone, FromRow)]
pub struct TicketRow {
    pub id: DbId,
    pub code: i64,
    pub created_by: Option<DbId>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub initial_type: String,
    pub resolved_type: Option<String>,
    pub status: String,
    pub title: String,
    pub description: String,
    pub details: serde_json::Value,
    pub impact_score: i32,
    pub urgency_score: i32,
    pub final_score: i32,
    pub red_flag: bool,
    pub priority: String,
    pub effort_score: i32,
    pub red_flags_data: Option<serde_json::Value>,
    pub impact_assessment_data: Option<serde_json::Value>,
    pub urgency_timeline_data: Option<serde_json::Value>,
    pub effort_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub closed_at: Option<Timestamp>,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = StoreError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        let details: Details = match row.details {
            serde_json::Value::Null => Details::new(),
            value => serde_json::from_value(value)
                .map_err(|e| StoreError::Corrupt(format!("tickets.details: {e}")))?,
        };
        let resolved_type = row
            .resolved_type
            .as_deref()
            .map(|v| parse_column::<ResolvedType>("tickets.resolved_type", v))
            .transpose()?;

        Ok(Ticket {
            id: row.id,
            code: row.code,
            created_by: row.created_by,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            initial_type: parse_column::<InitialType>("tickets.initial_type", &row.initial_type)?,
            resolved_type,
            status: parse_column::<TicketStatus>("tickets.status", &row.status)?,
            title: row.title,
            description: row.description,
            details,
            impact_score: row.impact_score,
            urgency_score: row.urgency_score,
            final_score: row.final_score,
            red_flag: row.red_flag,
            priority: parse_column::<Priority>("tickets.priority", &row.priority)?,
            effort_score: row.effort_score,
            red_flags_data: row.red_flags_data,
            impact_assessment_data: row.impact_assessment_data,
            urgency_timeline_data: row.urgency_timeline_data,
            effort_data: row.effort_data,
            created_at: row.created_at,
            updated_at: row.updated_at,
            closed_at: row.closed_at,
        })
    }
}

/// Convert a batch of rows, failing on the first corrupt one.
pub fn into_tickets(rows: Vec<TicketRow>) -> Result<Vec<Ticket>, StoreError> {
    rows.into_iter().map(Ticket::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use serde_json::json;

    fn row() -> TicketRow {
        TicketRow {
            id: uuid::Uuid::now_v7(),
            code: 42,
            created_by: None,
            contact_email: Some("a@b.com".into()),
            contact_phone: None,
            initial_type: "ISSUE_REPORT".into(),
            resolved_type: Some("DATA_CORRECTION".into()),
            status: "in_progress".into(),
            title: "Disk full".into(),
            description: String::new(),
            details: json!({ "host": "db-02", "attempts": 3 }),
            impact_score: 4,
            urgency_score: 2,
            final_score: 6,
            red_flag: false,
            priority: "P2".into(),
            effort_score: 0,
            red_flags_data: None,
            impact_assessment_data: Some(json!({ "lostRevenue": true })),
            urgency_timeline_data: None,
            effort_data: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            closed_at: None,
        }
    }

    #[test]
    fn maps_all_enum_columns() {
        let t = Ticket::try_from(row()).unwrap();
        assert_eq!(t.initial_type, InitialType::IssueReport);
        assert_eq!(t.resolved_type, Some(ResolvedType::DataCorrection));
        assert_eq!(t.status, TicketStatus::InProgress);
        assert_eq!(t.priority, Priority::P2);
        assert_eq!(t.details["host"], "db-02");
    }

    #[test]
    fn null_details_become_empty_map() {
        let mut r = row();
        r.details = serde_json::Value::Null;
        assert!(Ticket::try_from(r).unwrap().details.is_empty());
    }

    #[test]
    fn non_object_details_are_corrupt() {
        let mut r = row();
        r.details = json!([1, 2]);
        assert_matches!(Ticket::try_from(r), Err(StoreError::Corrupt(_)));
    }

    #[test]
    fn unknown_status_is_corrupt() {
        let mut r = row();
        r.status = "archived".into();
        assert_matches!(Ticket::try_from(r), Err(StoreError::Corrupt(msg)) if msg.starts_with("tickets.status"));
    }
}
