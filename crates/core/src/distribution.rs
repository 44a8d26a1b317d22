//! Point distribution among a ticket's assignees.
//!
//! A distribution is always computed wholesale: the full set of shares for a
//! ticket replaces whatever was stored before.

use serde::Serialize;

use crate::effort::{self, EffortInput};
use crate::error::CoreError;
use crate::ticket::Ticket;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointShare {
    pub user_id: DbId,
    pub points: f64,
}

/// Split `total` evenly over the distinct `assignees`, keeping first-seen
/// order.
///
/// An empty assignee list is a contract violation: completion requires at
/// least one assignee, so this cannot be reached through the state machine.
pub fn split_evenly(total: f64, assignees: &[DbId]) -> Result<Vec<PointShare>, CoreError> {
    let mut unique: Vec<DbId> = Vec::with_capacity(assignees.len());
    for id in assignees {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }

    if unique.is_empty() {
        tracing::error!(total, "Point distribution attempted with zero assignees");
        return Err(CoreError::ContractViolation(
            "cannot distribute points to zero assignees".into(),
        ));
    }

    let each = total / unique.len() as f64;
    Ok(unique
        .into_iter()
        .map(|user_id| PointShare {
            user_id,
            points: each,
        })
        .collect())
}

/// Where a ticket's point total comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PointBasis {
    /// Effort checklist; the total depends on the team size.
    Effort(EffortInput),
    /// Legacy path: the priority final score, independent of team size.
    FinalScore(i32),
}

impl PointBasis {
    /// The stored effort checklist if one parses, else the final score.
    pub fn for_ticket(ticket: &Ticket) -> Self {
        ticket
            .effort_data
            .as_ref()
            .and_then(|v| serde_json::from_value::<EffortInput>(v.clone()).ok())
            .map(Self::Effort)
            .unwrap_or(Self::FinalScore(ticket.final_score))
    }

    pub fn total(&self, assignee_count: usize) -> f64 {
        match self {
            Self::Effort(input) => {
                effort::total_points_for_distribution(input, assignee_count as i64)
            }
            Self::FinalScore(score) => f64::from(*score),
        }
    }
}

/// Shares for the current assignee set under `basis`.
pub fn distribute(basis: &PointBasis, assignees: &[DbId]) -> Result<Vec<PointShare>, CoreError> {
    let total = basis.total(assignees.len());
    split_evenly(total, assignees)
}
