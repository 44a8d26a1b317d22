//! Human-readable change narration for system comments.
//!
//! A mutation is narrated by diffing the ticket before and after against a
//! fixed list of observable fields. Each changed field renders through its
//! own template; unchanged fields produce nothing.

use crate::roles::Role;
use crate::ticket::{Ticket, TicketStatus, UserSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarratedField {
    Title,
    Description,
    InitialType,
    ResolvedType,
    Priority,
    ImpactScore,
    UrgencyScore,
    FinalScore,
    RedFlag,
}

/// Declaration order is rendering order.
pub const NARRATED_FIELDS: [NarratedField; 9] = [
    NarratedField::Title,
    NarratedField::Description,
    NarratedField::InitialType,
    NarratedField::ResolvedType,
    NarratedField::Priority,
    NarratedField::ImpactScore,
    NarratedField::UrgencyScore,
    NarratedField::FinalScore,
    NarratedField::RedFlag,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(i32),
    Flag(bool),
    Absent,
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Absent => f.write_str("none"),
        }
    }
}

impl NarratedField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::InitialType => "Initial Type",
            Self::ResolvedType => "Resolved Type",
            Self::Priority => "Priority",
            Self::ImpactScore => "Impact Score",
            Self::UrgencyScore => "Urgency Score",
            Self::FinalScore => "Final Score",
            Self::RedFlag => "Red Flag",
        }
    }

    pub fn read(&self, ticket: &Ticket) -> FieldValue {
        match self {
            Self::Title => FieldValue::Text(ticket.title.clone()),
            Self::Description => FieldValue::Text(ticket.description.clone()),
            Self::InitialType => FieldValue::Text(ticket.initial_type.as_str().into()),
            Self::ResolvedType => ticket
                .resolved_type
                .map_or(FieldValue::Absent, |r| FieldValue::Text(r.as_str().into())),
            Self::Priority => FieldValue::Text(ticket.priority.as_str().into()),
            Self::ImpactScore => FieldValue::Number(ticket.impact_score),
            Self::UrgencyScore => FieldValue::Number(ticket.urgency_score),
            Self::FinalScore => FieldValue::Number(ticket.final_score),
            Self::RedFlag => FieldValue::Flag(ticket.red_flag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: NarratedField,
    pub old: FieldValue,
    pub new: FieldValue,
}

impl FieldChange {
    pub fn render(&self) -> String {
        let label = self.field.label();
        match (self.field, &self.old, &self.new) {
            (NarratedField::Description, _, _) => format!("{label} was updated"),
            (NarratedField::RedFlag, _, FieldValue::Flag(true)) => format!("{label} was set"),
            (NarratedField::RedFlag, _, _) => format!("{label} was cleared"),
            (_, FieldValue::Absent, new) => format!("{label} set to \"{new}\""),
            (_, _, FieldValue::Absent) => format!("{label} was cleared"),
            (_, FieldValue::Number(old), FieldValue::Number(new)) => {
                format!("{label} changed from {old} to {new}")
            }
            (_, old, new) => format!("{label} changed from \"{old}\" to \"{new}\""),
        }
    }
}

/// Changed fields between two snapshots of the same ticket, in declaration
/// order.
pub fn diff(before: &Ticket, after: &Ticket) -> Vec<FieldChange> {
    NARRATED_FIELDS
        .into_iter()
        .filter_map(|field| {
            let old = field.read(before);
            let new = field.read(after);
            (old != new).then_some(FieldChange { field, old, new })
        })
        .collect()
}

/// Which request produced a batch of field changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Edit,
    FieldOverride,
    Assessment,
}

impl BatchKind {
    fn heading(&self) -> &'static str {
        match self {
            Self::Edit => "Ticket updated by",
            Self::FieldOverride => "Ticket fields updated by",
            Self::Assessment => "Priority assessment updated by",
        }
    }
}

/// One comment body for all changes in a request, or `None` when nothing
/// observable changed.
pub fn render_batch(kind: BatchKind, role: Role, changes: &[FieldChange]) -> Option<String> {
    if changes.is_empty() {
        return None;
    }
    let lines: Vec<String> = changes.iter().map(FieldChange::render).collect();
    Some(format!("{} {role}:\n\n{}", kind.heading(), lines.join("\n")))
}

pub fn status_line(from: TicketStatus, to: TicketStatus, role: Role) -> String {
    format!("Status changed from {from} to {to} by {role}")
}

pub fn assigned_line(user: &UserSummary) -> String {
    format!("Assigned to {} ({})", user.name, user.role)
}

pub fn unassigned_line(user: &UserSummary) -> String {
    format!("Unassigned {} ({})", user.name, user.role)
}

pub fn classified_line(ticket: &Ticket, role: Role) -> Option<String> {
    ticket
        .resolved_type
        .map(|r| format!("Classified as {r} by {role}"))
}
