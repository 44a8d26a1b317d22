//! Ticket state machine, classification rules and the administrative
//! field-override path.
//!
//! Transition rules:
//! - `pending`     -> `in_progress`, `canceled`
//! - `in_progress` -> `completed`, `canceled`, `pending` (reopen)
//! - `completed`   -> `in_progress` (reopen)
//! - `canceled`    -> (terminal)

use serde::Deserialize;

use crate::error::CoreError;
use crate::ticket::{InitialType, Priority, ResolvedType, Ticket, TicketStatus};
use crate::types::Timestamp;

/// Lowest and highest value an overridden score may take.
pub const SCORE_RANGE: std::ops::RangeInclusive<i32> = 0..=10;

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

pub fn allowed_transitions(from: TicketStatus) -> &'static [TicketStatus] {
    use TicketStatus::*;
    match from {
        Pending => &[InProgress, Canceled],
        InProgress => &[Completed, Canceled, Pending],
        Completed => &[InProgress],
        Canceled => &[],
    }
}

pub fn validate_transition(from: TicketStatus, to: TicketStatus) -> Result<(), CoreError> {
    let allowed = allowed_transitions(from);
    if allowed.contains(&to) {
        Ok(())
    } else {
        Err(CoreError::Precondition(format!(
            "Cannot transition ticket from '{}' to '{}'. Allowed transitions: {:?}",
            from,
            to,
            allowed.iter().map(|s| s.as_str()).collect::<Vec<_>>()
        )))
    }
}

/// Outcome of a validated transition, before anything is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub from: TicketStatus,
    pub to: TicketStatus,
    pub closed_at: Option<Timestamp>,
    /// Leaving `completed` drops the point distribution.
    pub clears_scores: bool,
}

/// Validate `ticket.status -> to` and work out its side effects.
///
/// Entering `completed` with no assignees is rejected here, before any
/// mutation or narration happens.
pub fn plan_transition(
    ticket: &Ticket,
    to: TicketStatus,
    assignee_count: usize,
    now: Timestamp,
) -> Result<TransitionPlan, CoreError> {
    validate_transition(ticket.status, to)?;

    if to == TicketStatus::Completed && assignee_count == 0 {
        return Err(CoreError::Precondition(
            "Ticket cannot be completed without at least one assignee".into(),
        ));
    }

    let closed_at = if to.is_closed() {
        Some(now)
    } else {
        None
    };

    Ok(TransitionPlan {
        from: ticket.status,
        to,
        closed_at,
        clears_scores: ticket.status == TicketStatus::Completed,
    })
}

pub fn apply_transition(ticket: &mut Ticket, plan: &TransitionPlan, now: Timestamp) {
    ticket.status = plan.to;
    ticket.closed_at = plan.closed_at;
    ticket.updated_at = now;
    if plan.clears_scores {
        ticket.effort_data = None;
        ticket.effort_score = 0;
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// An issue report may be classified once; nothing else may be classified.
pub fn validate_classification(ticket: &Ticket) -> Result<(), CoreError> {
    if ticket.initial_type != InitialType::IssueReport {
        return Err(CoreError::Precondition(format!(
            "Only ISSUE_REPORT tickets can be classified (ticket is {})",
            ticket.initial_type
        )));
    }
    if let Some(existing) = ticket.resolved_type {
        return Err(CoreError::Precondition(format!(
            "Ticket is already classified as {existing}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Field overrides
// ---------------------------------------------------------------------------

/// Administrative corrections. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOverrides {
    pub initial_type: Option<InitialType>,
    pub resolved_type: Option<ResolvedType>,
    pub priority: Option<Priority>,
    pub impact_score: Option<i32>,
    pub urgency_score: Option<i32>,
    pub final_score: Option<i32>,
    pub red_flag: Option<bool>,
}

impl FieldOverrides {
    pub fn is_empty(&self) -> bool {
        self.initial_type.is_none()
            && self.resolved_type.is_none()
            && self.priority.is_none()
            && self.impact_score.is_none()
            && self.urgency_score.is_none()
            && self.final_score.is_none()
            && self.red_flag.is_none()
    }
}

fn check_score(name: &str, value: Option<i32>) -> Result<(), CoreError> {
    match value {
        Some(v) if !SCORE_RANGE.contains(&v) => Err(CoreError::Validation(format!(
            "{name} must be between {} and {} (got {v})",
            SCORE_RANGE.start(),
            SCORE_RANGE.end()
        ))),
        _ => Ok(()),
    }
}

/// Apply overrides to a copy of `ticket`, rejecting combinations that would
/// break the resolved-type invariant.
pub fn apply_overrides(
    ticket: &Ticket,
    overrides: &FieldOverrides,
    now: Timestamp,
) -> Result<Ticket, CoreError> {
    if overrides.is_empty() {
        return Err(CoreError::Validation("No fields to update".into()));
    }
    check_score("impactScore", overrides.impact_score)?;
    check_score("urgencyScore", overrides.urgency_score)?;
    check_score("finalScore", overrides.final_score)?;

    let mut next = ticket.clone();
    if let Some(t) = overrides.initial_type {
        next.initial_type = t;
    }
    if let Some(r) = overrides.resolved_type {
        next.resolved_type = Some(r);
    }
    if let Some(p) = overrides.priority {
        next.priority = p;
    }
    if let Some(s) = overrides.impact_score {
        next.impact_score = s;
    }
    if let Some(s) = overrides.urgency_score {
        next.urgency_score = s;
    }
    if let Some(s) = overrides.final_score {
        next.final_score = s;
    }
    if let Some(flag) = overrides.red_flag {
        next.red_flag = flag;
    }

    if next.resolved_type.is_some() && next.initial_type != InitialType::IssueReport {
        return Err(CoreError::Validation(
            "resolvedType may only be set on ISSUE_REPORT tickets".into(),
        ));
    }

    if next != *ticket {
        next.updated_at = now;
    }
    Ok(next)
}
