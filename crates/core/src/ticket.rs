//! Ticket entity, its wire-stable enumerations, and the related records
//! (assignments, point shares, comments).
//!
//! Every enum serialises to the exact string stored in the database and sent
//! over the wire; `as_str` and `FromStr` are the only conversions used by the
//! persistence layer.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Pending,
    InProgress,
    Completed,
    Canceled,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Closed statuses carry a `closed_at` timestamp.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InitialType {
    IssueReport,
    ChangeRequestNormal,
    ServiceRequestDataCorrection,
    ServiceRequestDataExtraction,
    ServiceRequestAdvisory,
    ServiceRequestGeneral,
}

impl InitialType {
    pub const ALL: [InitialType; 6] = [
        Self::IssueReport,
        Self::ChangeRequestNormal,
        Self::ServiceRequestDataCorrection,
        Self::ServiceRequestDataExtraction,
        Self::ServiceRequestAdvisory,
        Self::ServiceRequestGeneral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IssueReport => "ISSUE_REPORT",
            Self::ChangeRequestNormal => "CHANGE_REQUEST_NORMAL",
            Self::ServiceRequestDataCorrection => "SERVICE_REQUEST_DATA_CORRECTION",
            Self::ServiceRequestDataExtraction => "SERVICE_REQUEST_DATA_EXTRACTION",
            Self::ServiceRequestAdvisory => "SERVICE_REQUEST_ADVISORY",
            Self::ServiceRequestGeneral => "SERVICE_REQUEST_GENERAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedType {
    EmergencyChange,
    DataCorrection,
}

impl ResolvedType {
    pub const ALL: [ResolvedType; 2] = [Self::EmergencyChange, Self::DataCorrection];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmergencyChange => "EMERGENCY_CHANGE",
            Self::DataCorrection => "DATA_CORRECTION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Self::P0, Self::P1, Self::P2, Self::P3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }
}

macro_rules! wire_string_impls {
    ($ty:ident, $label:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        CoreError::Validation(format!(
                            "Invalid {} '{}'. Must be one of: {:?}",
                            $label,
                            s,
                            Self::ALL.map(|v| v.as_str())
                        ))
                    })
            }
        }
    };
}

wire_string_impls!(TicketStatus, "ticket status");
wire_string_impls!(InitialType, "initial type");
wire_string_impls!(ResolvedType, "resolved type");
wire_string_impls!(Priority, "priority");

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;
pub const MAX_COMMENT_LENGTH: usize = 10_000;

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// Opaque per-ticket payload. Key-ordered, passed through unchanged.
pub type Details = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: DbId,
    /// Sequential human-facing number, assigned by the store.
    pub code: i64,
    pub created_by: Option<DbId>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub initial_type: InitialType,
    pub resolved_type: Option<ResolvedType>,
    pub status: TicketStatus,
    pub title: String,
    pub description: String,
    pub details: Details,
    pub impact_score: i32,
    pub urgency_score: i32,
    pub final_score: i32,
    pub red_flag: bool,
    pub priority: Priority,
    pub effort_score: i32,
    pub red_flags_data: Option<serde_json::Value>,
    pub impact_assessment_data: Option<serde_json::Value>,
    pub urgency_timeline_data: Option<serde_json::Value>,
    /// Effort checklist captured at completion; the basis for redistribution.
    pub effort_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub closed_at: Option<Timestamp>,
}

impl Ticket {
    /// Checks the two structural invariants every persisted ticket must hold.
    pub fn check_invariants(&self) -> Result<(), CoreError> {
        if self.status.is_closed() != self.closed_at.is_some() {
            return Err(CoreError::Internal(format!(
                "Ticket {} has status '{}' but closed_at is {}",
                self.id,
                self.status,
                if self.closed_at.is_some() { "set" } else { "unset" }
            )));
        }
        if self.resolved_type.is_some() && self.initial_type != InitialType::IssueReport {
            return Err(CoreError::Internal(format!(
                "Ticket {} has a resolved type but is not an issue report",
                self.id
            )));
        }
        Ok(())
    }

    /// Reporting category: the resolved type when classified, else the initial type.
    pub fn category(&self) -> &'static str {
        match self.resolved_type {
            Some(r) => r.as_str(),
            None => self.initial_type.as_str(),
        }
    }
}

/// Everything the engine needs to persist a new ticket. The store assigns
/// `code`.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub id: DbId,
    pub created_by: Option<DbId>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub initial_type: InitialType,
    pub title: String,
    pub description: String,
    pub details: Details,
    pub impact_score: i32,
    pub urgency_score: i32,
    pub final_score: i32,
    pub red_flag: bool,
    pub priority: Priority,
    pub red_flags_data: Option<serde_json::Value>,
    pub impact_assessment_data: Option<serde_json::Value>,
    pub urgency_timeline_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

impl NewTicket {
    /// Materialise the pending ticket the store will hold.
    pub fn into_ticket(self, code: i64) -> Ticket {
        Ticket {
            id: self.id,
            code,
            created_by: self.created_by,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            initial_type: self.initial_type,
            resolved_type: None,
            status: TicketStatus::Pending,
            title: self.title,
            description: self.description,
            details: self.details,
            impact_score: self.impact_score,
            urgency_score: self.urgency_score,
            final_score: self.final_score,
            red_flag: self.red_flag,
            priority: self.priority,
            effort_score: 0,
            red_flags_data: self.red_flags_data,
            impact_assessment_data: self.impact_assessment_data,
            urgency_timeline_data: self.urgency_timeline_data,
            effort_data: None,
            created_at: self.created_at,
            updated_at: self.created_at,
            closed_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Users, assignments, scores, comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub ticket_id: DbId,
    pub assignee_id: DbId,
    pub assigned_at: Timestamp,
    pub assigned_by: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScore {
    pub user_id: DbId,
    pub ticket_id: DbId,
    pub points: f64,
    pub awarded_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: DbId,
    pub ticket_id: DbId,
    pub author_id: Option<DbId>,
    pub body: String,
    pub is_system_generated: bool,
    pub created_at: Timestamp,
}

impl Comment {
    /// An author-less narration comment.
    pub fn system(ticket_id: DbId, body: String, now: Timestamp) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            ticket_id,
            author_id: None,
            body,
            is_system_generated: true,
            created_at: now,
        }
    }
}

/// One structured audit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: DbId,
    pub ticket_id: DbId,
    pub actor_id: Option<DbId>,
    pub action: String,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

pub fn validate_comment_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation("Comment body must not be empty".into()));
    }
    let len = body.chars().count();
    if len > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}
