//! [`TicketStore`] backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use tms_core::distribution::PointShare;
use tms_core::error::StoreError;
use tms_core::metrics::{MetricsSummary, UserRanking};
use tms_core::search::{TicketFilter, UserFilter};
use tms_core::store::TicketStore;
use tms_core::ticket::{
    Assignment, AuditEntry, Comment, NewTicket, Ticket, UserScore, UserSummary,
};
use tms_core::types::{DbId, Timestamp};

use crate::error::map_sqlx;
use crate::models::metrics::into_count_map;
use crate::models::ticket::into_tickets;
use crate::repositories::{
    AssignmentRepo, AuditLogRepo, CommentRepo, MetricsRepo, TicketRepo, UserRepo, UserScoreRepo,
};

#[derive(Clone)]
pub struct PgTicketStore {
    pool: PgPool,
}

impl PgTicketStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(map_sqlx)
    }

    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket, StoreError> {
        TicketRepo::create(&self.pool, &ticket)
            .await
            .map_err(map_sqlx)?
            .try_into()
    }

    async fn find_ticket(&self, id: DbId) -> Result<Option<Ticket>, StoreError> {
        TicketRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx)?
            .map(Ticket::try_from)
            .transpose()
    }

    async fn save_ticket(&self, ticket: &Ticket) -> Result<Ticket, StoreError> {
        TicketRepo::update(&self.pool, ticket)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| StoreError::Corrupt(format!("ticket {} vanished", ticket.id)))?
            .try_into()
    }

    async fn list_tickets(
        &self,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Ticket>, i64), StoreError> {
        let rows = TicketRepo::list_filtered(&self.pool, filter, limit, offset)
            .await
            .map_err(map_sqlx)?;
        let total = TicketRepo::count_filtered(&self.pool, filter)
            .await
            .map_err(map_sqlx)?;
        Ok((into_tickets(rows)?, total))
    }

    async fn find_user(&self, id: DbId) -> Result<Option<UserSummary>, StoreError> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx)?
            .map(UserSummary::try_from)
            .transpose()
    }

    async fn search_users(
        &self,
        filter: &UserFilter,
        limit: i64,
    ) -> Result<Vec<UserSummary>, StoreError> {
        UserRepo::search(&self.pool, filter, limit)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(UserSummary::try_from)
            .collect()
    }

    async fn list_assignees(&self, ticket_id: DbId) -> Result<Vec<UserSummary>, StoreError> {
        AssignmentRepo::list_assignees(&self.pool, ticket_id)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(UserSummary::try_from)
            .collect()
    }

    async fn add_assignment(&self, assignment: &Assignment) -> Result<bool, StoreError> {
        AssignmentRepo::insert_if_absent(&self.pool, assignment)
            .await
            .map_err(map_sqlx)
    }

    async fn remove_assignment(
        &self,
        ticket_id: DbId,
        assignee_id: DbId,
    ) -> Result<bool, StoreError> {
        AssignmentRepo::delete(&self.pool, ticket_id, assignee_id)
            .await
            .map_err(map_sqlx)
    }

    async fn replace_scores(
        &self,
        ticket_id: DbId,
        shares: &[PointShare],
        awarded_at: Timestamp,
    ) -> Result<Vec<UserScore>, StoreError> {
        let rows = UserScoreRepo::replace_for_ticket(&self.pool, ticket_id, shares, awarded_at)
            .await
            .map_err(map_sqlx)?;
        Ok(rows.into_iter().map(UserScore::from).collect())
    }

    async fn clear_scores(&self, ticket_id: DbId) -> Result<u64, StoreError> {
        UserScoreRepo::delete_for_ticket(&self.pool, ticket_id)
            .await
            .map_err(map_sqlx)
    }

    async fn list_scores(&self, ticket_id: DbId) -> Result<Vec<UserScore>, StoreError> {
        let rows = UserScoreRepo::list_for_ticket(&self.pool, ticket_id)
            .await
            .map_err(map_sqlx)?;
        Ok(rows.into_iter().map(UserScore::from).collect())
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<Comment, StoreError> {
        CommentRepo::create(&self.pool, comment)
            .await
            .map(Comment::from)
            .map_err(map_sqlx)
    }

    async fn list_comments(&self, ticket_id: DbId) -> Result<Vec<Comment>, StoreError> {
        let rows = CommentRepo::list_for_ticket(&self.pool, ticket_id)
            .await
            .map_err(map_sqlx)?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn record_audit(&self, entry: &AuditEntry) -> Result<(), StoreError> {
        AuditLogRepo::insert(&self.pool, entry)
            .await
            .map_err(map_sqlx)
    }

    async fn rankings(&self, limit: i64) -> Result<Vec<UserRanking>, StoreError> {
        UserScoreRepo::rankings(&self.pool, limit)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(UserRanking::try_from)
            .collect()
    }

    async fn summary(&self) -> Result<MetricsSummary, StoreError> {
        let pool = &self.pool;
        Ok(MetricsSummary {
            total: MetricsRepo::total(pool).await.map_err(map_sqlx)?,
            status_counts: into_count_map(MetricsRepo::status_counts(pool).await.map_err(map_sqlx)?),
            priority_counts: into_count_map(
                MetricsRepo::priority_counts(pool).await.map_err(map_sqlx)?,
            ),
            category_counts: into_count_map(
                MetricsRepo::category_counts(pool).await.map_err(map_sqlx)?,
            ),
            issue_report_counts: into_count_map(
                MetricsRepo::issue_report_counts(pool)
                    .await
                    .map_err(map_sqlx)?,
            ),
        })
    }
}
