//! In-process [`TicketStore`] used by tests and database-less local runs.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::distribution::PointShare;
use crate::error::StoreError;
use crate::metrics::{self, MetricsSummary, UserRanking};
use crate::search::{TicketFilter, UserFilter};
use crate::store::TicketStore;
use crate::ticket::{Assignment, AuditEntry, Comment, NewTicket, Ticket, UserScore, UserSummary};
use crate::types::{DbId, Timestamp};

#[derive(Default)]
struct State {
    last_code: i64,
    users: Vec<UserSummary>,
    tickets: Vec<Ticket>,
    assignments: Vec<Assignment>,
    scores: Vec<UserScore>,
    comments: Vec<Comment>,
    audit: Vec<AuditEntry>,
}

impl State {
    fn assignee_ids(&self, ticket_id: DbId) -> Vec<DbId> {
        self.assignments
            .iter()
            .filter(|a| a.ticket_id == ticket_id)
            .map(|a| a.assignee_id)
            .collect()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }

    /// Register a user that tickets can be assigned to.
    pub fn insert_user(&self, user: UserSummary) -> Result<(), StoreError> {
        let mut state = self.state()?;
        if state.users.iter().any(|u| u.id == user.id || u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "user {} already exists",
                user.email
            )));
        }
        state.users.push(user);
        Ok(())
    }

    /// Audit entries recorded so far, oldest first.
    pub fn audit_entries(&self) -> Result<Vec<AuditEntry>, StoreError> {
        Ok(self.state()?.audit.clone())
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.state().map(|_| ())
    }

    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket, StoreError> {
        let mut state = self.state()?;
        if state.tickets.iter().any(|t| t.id == ticket.id) {
            return Err(StoreError::Conflict(format!("ticket {} already exists", ticket.id)));
        }
        state.last_code += 1;
        let stored = ticket.into_ticket(state.last_code);
        state.tickets.push(stored.clone());
        Ok(stored)
    }

    async fn find_ticket(&self, id: DbId) -> Result<Option<Ticket>, StoreError> {
        Ok(self.state()?.tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn save_ticket(&self, ticket: &Ticket) -> Result<Ticket, StoreError> {
        let mut state = self.state()?;
        let slot = state
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket.id)
            .ok_or_else(|| StoreError::Corrupt(format!("ticket {} vanished", ticket.id)))?;
        *slot = ticket.clone();
        Ok(ticket.clone())
    }

    async fn list_tickets(
        &self,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Ticket>, i64), StoreError> {
        let state = self.state()?;
        let mut matching: Vec<&Ticket> = state
            .tickets
            .iter()
            .filter(|t| filter.matches(t, &state.assignee_ids(t.id)))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.code.cmp(&a.code)));

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn find_user(&self, id: DbId) -> Result<Option<UserSummary>, StoreError> {
        Ok(self.state()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn search_users(
        &self,
        filter: &UserFilter,
        limit: i64,
    ) -> Result<Vec<UserSummary>, StoreError> {
        let state = self.state()?;
        let mut found: Vec<UserSummary> = state
            .users
            .iter()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found.truncate(limit.max(0) as usize);
        Ok(found)
    }

    async fn list_assignees(&self, ticket_id: DbId) -> Result<Vec<UserSummary>, StoreError> {
        let state = self.state()?;
        state
            .assignee_ids(ticket_id)
            .into_iter()
            .map(|id| {
                state
                    .users
                    .iter()
                    .find(|u| u.id == id)
                    .cloned()
                    .ok_or_else(|| StoreError::Corrupt(format!("assignee {id} has no user row")))
            })
            .collect()
    }

    async fn add_assignment(&self, assignment: &Assignment) -> Result<bool, StoreError> {
        let mut state = self.state()?;
        if !state.users.iter().any(|u| u.id == assignment.assignee_id) {
            return Err(StoreError::Conflict(format!(
                "user {} does not exist",
                assignment.assignee_id
            )));
        }
        let exists = state
            .assignments
            .iter()
            .any(|a| a.ticket_id == assignment.ticket_id && a.assignee_id == assignment.assignee_id);
        if exists {
            return Ok(false);
        }
        state.assignments.push(assignment.clone());
        Ok(true)
    }

    async fn remove_assignment(
        &self,
        ticket_id: DbId,
        assignee_id: DbId,
    ) -> Result<bool, StoreError> {
        let mut state = self.state()?;
        let before = state.assignments.len();
        state
            .assignments
            .retain(|a| !(a.ticket_id == ticket_id && a.assignee_id == assignee_id));
        Ok(state.assignments.len() < before)
    }

    async fn replace_scores(
        &self,
        ticket_id: DbId,
        shares: &[PointShare],
        awarded_at: Timestamp,
    ) -> Result<Vec<UserScore>, StoreError> {
        let mut state = self.state()?;
        state.scores.retain(|s| s.ticket_id != ticket_id);
        let rows: Vec<UserScore> = shares
            .iter()
            .map(|s| UserScore {
                user_id: s.user_id,
                ticket_id,
                points: s.points,
                awarded_at,
            })
            .collect();
        state.scores.extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn clear_scores(&self, ticket_id: DbId) -> Result<u64, StoreError> {
        let mut state = self.state()?;
        let before = state.scores.len();
        state.scores.retain(|s| s.ticket_id != ticket_id);
        Ok((before - state.scores.len()) as u64)
    }

    async fn list_scores(&self, ticket_id: DbId) -> Result<Vec<UserScore>, StoreError> {
        Ok(self
            .state()?
            .scores
            .iter()
            .filter(|s| s.ticket_id == ticket_id)
            .cloned()
            .collect())
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<Comment, StoreError> {
        self.state()?.comments.push(comment.clone());
        Ok(comment.clone())
    }

    async fn list_comments(&self, ticket_id: DbId) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .state()?
            .comments
            .iter()
            .filter(|c| c.ticket_id == ticket_id)
            .cloned()
            .collect())
    }

    async fn record_audit(&self, entry: &AuditEntry) -> Result<(), StoreError> {
        self.state()?.audit.push(entry.clone());
        Ok(())
    }

    async fn rankings(&self, limit: i64) -> Result<Vec<UserRanking>, StoreError> {
        let state = self.state()?;
        Ok(metrics::rank_users(
            &state.users,
            &state.scores,
            limit.max(0) as usize,
        ))
    }

    async fn summary(&self) -> Result<MetricsSummary, StoreError> {
        Ok(metrics::summarize(&self.state()?.tickets))
    }
}
