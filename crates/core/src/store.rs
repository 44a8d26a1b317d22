//! The record store the engine persists through.
//!
//! Implementations must give insert-if-absent semantics to
//! [`TicketStore::add_assignment`] and replace-all semantics to
//! [`TicketStore::replace_scores`]; the engine relies on both for
//! correctness under concurrent requests and takes no locks of its own.

use async_trait::async_trait;

use crate::distribution::PointShare;
use crate::error::StoreError;
use crate::metrics::{MetricsSummary, UserRanking};
use crate::search::{TicketFilter, UserFilter};
use crate::ticket::{Assignment, AuditEntry, Comment, NewTicket, Ticket, UserScore, UserSummary};
use crate::types::{DbId, Timestamp};

#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), StoreError>;

    // -- tickets ------------------------------------------------------------

    /// Persist a new ticket and return it with its sequential code.
    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket, StoreError>;

    async fn find_ticket(&self, id: DbId) -> Result<Option<Ticket>, StoreError>;

    /// Overwrite every mutable column of an existing ticket.
    async fn save_ticket(&self, ticket: &Ticket) -> Result<Ticket, StoreError>;

    /// A page of matching tickets, newest first, plus the total match count.
    async fn list_tickets(
        &self,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Ticket>, i64), StoreError>;

    // -- users --------------------------------------------------------------

    async fn find_user(&self, id: DbId) -> Result<Option<UserSummary>, StoreError>;

    /// Matching users ordered by name, at most `limit` of them.
    async fn search_users(
        &self,
        filter: &UserFilter,
        limit: i64,
    ) -> Result<Vec<UserSummary>, StoreError>;

    // -- assignments --------------------------------------------------------

    /// Current assignees in assignment order.
    async fn list_assignees(&self, ticket_id: DbId) -> Result<Vec<UserSummary>, StoreError>;

    /// Insert unless `(ticket, assignee)` already exists. Returns whether a
    /// row was added.
    async fn add_assignment(&self, assignment: &Assignment) -> Result<bool, StoreError>;

    /// Returns whether a row was removed.
    async fn remove_assignment(&self, ticket_id: DbId, assignee_id: DbId)
        -> Result<bool, StoreError>;

    // -- scores -------------------------------------------------------------

    /// Delete all score rows for the ticket, then insert `shares`, as one
    /// unit.
    async fn replace_scores(
        &self,
        ticket_id: DbId,
        shares: &[PointShare],
        awarded_at: Timestamp,
    ) -> Result<Vec<UserScore>, StoreError>;

    /// Returns the number of rows deleted.
    async fn clear_scores(&self, ticket_id: DbId) -> Result<u64, StoreError>;

    async fn list_scores(&self, ticket_id: DbId) -> Result<Vec<UserScore>, StoreError>;

    // -- comments and audit -------------------------------------------------

    async fn insert_comment(&self, comment: &Comment) -> Result<Comment, StoreError>;

    /// Oldest first.
    async fn list_comments(&self, ticket_id: DbId) -> Result<Vec<Comment>, StoreError>;

    async fn record_audit(&self, entry: &AuditEntry) -> Result<(), StoreError>;

    // -- aggregates ---------------------------------------------------------

    async fn rankings(&self, limit: i64) -> Result<Vec<UserRanking>, StoreError>;

    async fn summary(&self) -> Result<MetricsSummary, StoreError>;
}
