//! Ticket list filtering and pagination bounds.

use serde::Deserialize;

use crate::roles::Role;
use crate::ticket::{InitialType, Priority, Ticket, TicketStatus, UserSummary};
use crate::types::DbId;

pub const DEFAULT_LIST_LIMIT: i64 = 20;
pub const MAX_LIST_LIMIT: i64 = 100;
pub const DEFAULT_RANKING_LIMIT: i64 = 10;
/// Fixed result cap for user lookups.
pub const USER_SEARCH_LIMIT: i64 = 20;

/// Optional filters for the ticket list. All present filters must match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub initial_type: Option<InitialType>,
    pub assignee_id: Option<DbId>,
    pub created_by: Option<DbId>,
    /// Case-insensitive substring of title or description.
    pub q: Option<String>,
}

impl TicketFilter {
    /// The trimmed free-text term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// In-memory evaluation. `assignees` are the ticket's current assignees.
    pub fn matches(&self, ticket: &Ticket, assignees: &[DbId]) -> bool {
        if self.status.is_some_and(|s| s != ticket.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != ticket.priority) {
            return false;
        }
        if self.initial_type.is_some_and(|t| t != ticket.initial_type) {
            return false;
        }
        if let Some(creator) = self.created_by {
            if ticket.created_by != Some(creator) {
                return false;
            }
        }
        if let Some(assignee) = self.assignee_id {
            if !assignees.contains(&assignee) {
                return false;
            }
        }
        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            if !ticket.title.to_lowercase().contains(&term)
                && !ticket.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }
}

/// User lookup for the assignee picker: a name/email substring and an
/// optional exact role.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilter {
    pub q: Option<String>,
    pub role: Option<Role>,
}

impl UserFilter {
    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn matches(&self, user: &UserSummary) -> bool {
        if self.role.is_some_and(|r| r != user.role) {
            return false;
        }
        match self.search_term() {
            Some(term) => {
                let term = term.to_lowercase();
                user.name.to_lowercase().contains(&term)
                    || user.email.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

/// Clamp a user-provided limit into `1..=max`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
