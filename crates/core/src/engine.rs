//! Ticket engine: the operations the API exposes, composed from the policy,
//! state machine, scorers, distribution and narration modules over a
//! [`TicketStore`].
//!
//! Every operation authorizes and validates before it writes anything.
//! Narration comments and audit entries are written after the primary
//! mutation; their failures are logged and do not fail the operation.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::audit::{self, actions};
use crate::distribution::{self, PointBasis, PointShare};
use crate::effort::{self, EffortInput};
use crate::error::CoreError;
use crate::metrics::{MetricsSummary, UserRanking};
use crate::narration::{self, BatchKind};
use crate::policy;
use crate::priority;
use crate::roles::Actor;
use crate::search::{self, TicketFilter, UserFilter, USER_SEARCH_LIMIT};
use crate::store::TicketStore;
use crate::ticket::{
    self, Assignment, Comment, Details, InitialType, NewTicket, ResolvedType, Ticket,
    TicketStatus, UserScore, UserSummary,
};
use crate::types::DbId;
use crate::workflow::{self, FieldOverrides};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    pub initial_type: InitialType,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub description: String,
    #[serde(default)]
    pub details: Details,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(length(max = 50))]
    pub contact_phone: Option<String>,
    pub red_flags_data: Option<serde_json::Value>,
    pub impact_assessment_data: Option<serde_json::Value>,
    pub urgency_timeline_data: Option<serde_json::Value>,
}

impl CreateTicket {
    /// Blank contact fields are treated as absent.
    fn normalize(&mut self) {
        for field in [&mut self.contact_email, &mut self.contact_phone] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
        if let Some(email) = self.contact_email.as_mut() {
            *email = email.trim().to_string();
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicket {
    pub title: Option<String>,
    pub description: Option<String>,
    pub details: Option<Details>,
}

/// Which raw priority blob an assessment update replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentKind {
    RedFlags,
    ImpactAssessment,
    UrgencyTimeline,
}

impl AssessmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RedFlags => "red_flags",
            Self::ImpactAssessment => "impact_assessment",
            Self::UrgencyTimeline => "urgency_timeline",
        }
    }
}

/// A ticket with everything the detail view shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetail {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub assignees: Vec<UserSummary>,
    /// First assignee, kept for clients of the single-assignee API.
    pub assignee_id: Option<DbId>,
    pub comments: Vec<Comment>,
    pub points: Vec<UserScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct TicketEngine {
    store: Arc<dyn TicketStore>,
}

impl TicketEngine {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn TicketStore> {
        &self.store
    }

    // -- reads --------------------------------------------------------------

    pub async fn health(&self) -> Result<(), CoreError> {
        self.store.ping().await?;
        Ok(())
    }

    async fn load(&self, id: DbId) -> Result<Ticket, CoreError> {
        self.store
            .find_ticket(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "ticket",
                id,
            })
    }

    async fn save(&self, ticket: &Ticket) -> Result<Ticket, CoreError> {
        ticket.check_invariants()?;
        Ok(self.store.save_ticket(ticket).await?)
    }

    async fn load_user(&self, id: DbId) -> Result<UserSummary, CoreError> {
        self.store
            .find_user(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "user", id })
    }

    pub async fn detail(&self, id: DbId) -> Result<TicketDetail, CoreError> {
        let ticket = self.load(id).await?;
        let assignees = self.store.list_assignees(id).await?;
        let comments = self.store.list_comments(id).await?;
        let points = self.store.list_scores(id).await?;
        Ok(TicketDetail {
            assignee_id: assignees.first().map(|u| u.id),
            ticket,
            assignees,
            comments,
            points,
        })
    }

    pub async fn list(
        &self,
        filter: &TicketFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Page<Ticket>, CoreError> {
        let limit = search::clamp_limit(limit, search::DEFAULT_LIST_LIMIT, search::MAX_LIST_LIMIT);
        let offset = search::clamp_offset(offset);
        let (items, total) = self.store.list_tickets(filter, limit, offset).await?;
        Ok(Page {
            items,
            total,
            limit,
            offset,
        })
    }

    pub async fn points(&self, id: DbId) -> Result<Vec<UserScore>, CoreError> {
        self.load(id).await?;
        Ok(self.store.list_scores(id).await?)
    }

    /// Users matching `filter`, by name, capped at [`USER_SEARCH_LIMIT`].
    pub async fn search_users(
        &self,
        actor: &Actor,
        filter: &UserFilter,
    ) -> Result<Vec<UserSummary>, CoreError> {
        policy::authorize_search_users(actor)?;
        Ok(self.store.search_users(filter, USER_SEARCH_LIMIT).await?)
    }

    pub async fn rankings(&self, limit: Option<i64>) -> Result<Vec<UserRanking>, CoreError> {
        let limit = search::clamp_limit(
            limit,
            search::DEFAULT_RANKING_LIMIT,
            search::MAX_LIST_LIMIT,
        );
        Ok(self.store.rankings(limit).await?)
    }

    pub async fn summary(&self) -> Result<MetricsSummary, CoreError> {
        Ok(self.store.summary().await?)
    }

    // -- creation and edits -------------------------------------------------

    pub async fn create(&self, actor: &Actor, mut input: CreateTicket) -> Result<Ticket, CoreError> {
        input.normalize();
        policy::authorize_create(actor, input.initial_type, input.contact_email.as_deref())?;
        input.validate()?;
        ticket::validate_title(&input.title)?;

        let scored = priority::compute(&priority::input_from_blobs(
            input.red_flags_data.as_ref(),
            input.impact_assessment_data.as_ref(),
            input.urgency_timeline_data.as_ref(),
        ));

        let new = NewTicket {
            id: uuid::Uuid::now_v7(),
            created_by: actor.id,
            contact_email: input.contact_email,
            contact_phone: input.contact_phone,
            initial_type: input.initial_type,
            title: input.title.trim().to_string(),
            description: input.description,
            details: input.details,
            impact_score: scored.impact,
            urgency_score: scored.urgency,
            final_score: scored.final_score,
            red_flag: scored.red_flag,
            priority: scored.priority,
            red_flags_data: input.red_flags_data,
            impact_assessment_data: input.impact_assessment_data,
            urgency_timeline_data: input.urgency_timeline_data,
            created_at: Utc::now(),
        };
        let ticket = self.store.insert_ticket(new).await?;

        tracing::info!(
            ticket_id = %ticket.id,
            code = ticket.code,
            actor_role = %actor.role,
            initial_type = %ticket.initial_type,
            priority = %ticket.priority,
            "Ticket created",
        );
        self.audit(
            &ticket,
            actor,
            actions::CREATE_TICKET,
            json!({
                "initialType": ticket.initial_type,
                "priority": ticket.priority,
                "finalScore": ticket.final_score,
            }),
        )
        .await;
        Ok(ticket)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: DbId,
        input: UpdateTicket,
    ) -> Result<Ticket, CoreError> {
        let current = self.load(id).await?;
        policy::authorize_edit(actor, &current)?;

        let mut next = current.clone();
        if let Some(title) = input.title {
            ticket::validate_title(&title)?;
            next.title = title.trim().to_string();
        }
        if let Some(description) = input.description {
            ticket::validate_description(&description)?;
            next.description = description;
        }
        if let Some(details) = input.details {
            next.details = details;
        }
        if next == current {
            return Ok(current);
        }
        next.updated_at = Utc::now();

        let saved = self.save(&next).await?;
        tracing::info!(ticket_id = %id, actor_role = %actor.role, "Ticket updated");

        let changes = narration::diff(&current, &saved);
        if let Some(body) = narration::render_batch(BatchKind::Edit, actor.role, &changes) {
            self.narrate(id, body).await;
        }
        self.audit(
            &saved,
            actor,
            actions::UPDATE_TICKET,
            json!({ "changes": changes.iter().map(|c| c.field.label()).collect::<Vec<_>>() }),
        )
        .await;
        Ok(saved)
    }

    /// Administrative correction of type, priority and score fields.
    pub async fn override_fields(
        &self,
        actor: &Actor,
        id: DbId,
        overrides: FieldOverrides,
    ) -> Result<Ticket, CoreError> {
        policy::authorize_field_override(actor)?;
        let current = self.load(id).await?;
        let next = workflow::apply_overrides(&current, &overrides, Utc::now())?;
        if next == current {
            return Ok(current);
        }

        let saved = self.save(&next).await?;
        tracing::info!(ticket_id = %id, actor_role = %actor.role, "Ticket fields overridden");
        self.rebase_points(&current, &saved).await?;

        let changes = narration::diff(&current, &saved);
        if let Some(body) = narration::render_batch(BatchKind::FieldOverride, actor.role, &changes)
        {
            self.narrate(id, body).await;
        }
        self.audit(
            &saved,
            actor,
            actions::UPDATE_TICKET_FIELDS,
            json!({
                "before": fields_snapshot(&current),
                "after": fields_snapshot(&saved),
            }),
        )
        .await;
        Ok(saved)
    }

    pub async fn classify(
        &self,
        actor: &Actor,
        id: DbId,
        resolved_type: ResolvedType,
    ) -> Result<Ticket, CoreError> {
        policy::authorize_classify(actor)?;
        let current = self.load(id).await?;
        workflow::validate_classification(&current)?;

        let mut next = current.clone();
        next.resolved_type = Some(resolved_type);
        next.updated_at = Utc::now();
        let saved = self.save(&next).await?;

        tracing::info!(
            ticket_id = %id,
            actor_role = %actor.role,
            resolved_type = %resolved_type,
            "Ticket classified",
        );
        if let Some(body) = narration::classified_line(&saved, actor.role) {
            self.narrate(id, body).await;
        }
        self.audit(
            &saved,
            actor,
            actions::CLASSIFY,
            json!({ "resolvedType": resolved_type }),
        )
        .await;
        Ok(saved)
    }

    /// Replace one raw priority blob and recompute the priority from all
    /// three stored blobs.
    pub async fn update_assessment(
        &self,
        actor: &Actor,
        id: DbId,
        kind: AssessmentKind,
        blob: serde_json::Value,
    ) -> Result<Ticket, CoreError> {
        policy::authorize_assessment_update(actor)?;
        let current = self.load(id).await?;

        let mut next = current.clone();
        match kind {
            AssessmentKind::RedFlags => next.red_flags_data = Some(blob),
            AssessmentKind::ImpactAssessment => next.impact_assessment_data = Some(blob),
            AssessmentKind::UrgencyTimeline => next.urgency_timeline_data = Some(blob),
        }
        let scored = priority::compute(&priority::input_from_blobs(
            next.red_flags_data.as_ref(),
            next.impact_assessment_data.as_ref(),
            next.urgency_timeline_data.as_ref(),
        ));
        next.impact_score = scored.impact;
        next.urgency_score = scored.urgency;
        next.final_score = scored.final_score;
        next.red_flag = scored.red_flag;
        next.priority = scored.priority;
        if next == current {
            return Ok(current);
        }
        next.updated_at = Utc::now();

        let saved = self.save(&next).await?;
        tracing::info!(
            ticket_id = %id,
            actor_role = %actor.role,
            assessment = kind.as_str(),
            priority = %saved.priority,
            "Priority assessment updated",
        );
        self.rebase_points(&current, &saved).await?;

        let changes = narration::diff(&current, &saved);
        if let Some(body) = narration::render_batch(BatchKind::Assessment, actor.role, &changes) {
            self.narrate(id, body).await;
        }
        self.audit(
            &saved,
            actor,
            actions::UPDATE_ASSESSMENT,
            json!({ "assessment": kind.as_str(), "result": scored }),
        )
        .await;
        Ok(saved)
    }

    // -- status -------------------------------------------------------------

    /// Move a ticket to `to`.
    ///
    /// Moving to the current status is a no-op. `effort` may only accompany
    /// a move to `completed`; when present it becomes the ticket's point
    /// basis.
    pub async fn change_status(
        &self,
        actor: &Actor,
        id: DbId,
        to: TicketStatus,
        effort: Option<EffortInput>,
    ) -> Result<Ticket, CoreError> {
        if effort.is_some() && to != TicketStatus::Completed {
            return Err(CoreError::Validation(
                "An effort checklist can only be supplied when completing a ticket".into(),
            ));
        }

        let current = self.load(id).await?;
        policy::authorize_status_change(actor, &current, to)?;
        if current.status == to {
            return Ok(current);
        }

        let assignees = self.store.list_assignees(id).await?;
        let now = Utc::now();
        let plan = workflow::plan_transition(&current, to, assignees.len(), now)?;

        let mut next = current.clone();
        workflow::apply_transition(&mut next, &plan, now);
        if let Some(checklist) = effort.as_ref() {
            next.effort_data = Some(serde_json::to_value(checklist).map_err(|e| {
                CoreError::Internal(format!("Failed to encode effort checklist: {e}"))
            })?);
            next.effort_score = effort::compute_base(checklist);
        }

        let saved = self.save(&next).await?;
        tracing::info!(
            ticket_id = %id,
            actor_role = %actor.role,
            from = %plan.from,
            to = %plan.to,
            "Ticket status changed",
        );

        self.narrate(id, narration::status_line(plan.from, plan.to, actor.role))
            .await;

        if plan.clears_scores {
            let removed = self.store.clear_scores(id).await?;
            tracing::debug!(ticket_id = %id, removed, "Cleared point distribution on reopen");
        }
        if to == TicketStatus::Completed {
            let ids: Vec<DbId> = assignees.iter().map(|u| u.id).collect();
            self.distribute_from_basis(&saved, &ids).await?;
        }

        self.audit(
            &saved,
            actor,
            actions::STATUS_CHANGE,
            json!({ "from": plan.from, "to": plan.to, "effort": saved.effort_data }),
        )
        .await;
        Ok(saved)
    }

    // -- assignment ---------------------------------------------------------

    /// Add assignees. Already-assigned users are skipped silently. Returns
    /// the full assignee list.
    pub async fn assign(
        &self,
        actor: &Actor,
        id: DbId,
        user_ids: &[DbId],
    ) -> Result<Vec<UserSummary>, CoreError> {
        let user_ids = dedup(user_ids)?;
        policy::authorize_assign(actor, &user_ids)?;
        let ticket = self.load(id).await?;

        let mut users = Vec::with_capacity(user_ids.len());
        for uid in &user_ids {
            users.push(self.load_user(*uid).await?);
        }

        let now = Utc::now();
        let mut added = Vec::new();
        for user in users {
            let row = Assignment {
                ticket_id: id,
                assignee_id: user.id,
                assigned_at: now,
                assigned_by: actor.id,
            };
            if self.store.add_assignment(&row).await? {
                self.narrate(id, narration::assigned_line(&user)).await;
                added.push(user.id);
            }
        }

        let assignees = self.store.list_assignees(id).await?;
        if added.is_empty() {
            return Ok(assignees);
        }

        tracing::info!(
            ticket_id = %id,
            actor_role = %actor.role,
            added = added.len(),
            "Assignees added",
        );
        if ticket.status == TicketStatus::Completed {
            self.redistribute(&ticket, &assignees).await?;
        }
        self.audit(&ticket, actor, actions::ASSIGN, json!({ "added": added }))
            .await;
        Ok(assignees)
    }

    /// Remove assignees. Users not on the ticket are skipped silently.
    pub async fn unassign(
        &self,
        actor: &Actor,
        id: DbId,
        user_ids: &[DbId],
    ) -> Result<Vec<UserSummary>, CoreError> {
        let user_ids = dedup(user_ids)?;
        policy::authorize_unassign(actor, &user_ids)?;
        let ticket = self.load(id).await?;

        let current = self.store.list_assignees(id).await?;
        let mut removed = Vec::new();
        for uid in &user_ids {
            let Some(user) = current.iter().find(|u| u.id == *uid) else {
                continue;
            };
            if self.store.remove_assignment(id, *uid).await? {
                self.narrate(id, narration::unassigned_line(user)).await;
                removed.push(*uid);
            }
        }

        let assignees = self.store.list_assignees(id).await?;
        if removed.is_empty() {
            return Ok(assignees);
        }

        tracing::info!(
            ticket_id = %id,
            actor_role = %actor.role,
            removed = removed.len(),
            "Assignees removed",
        );
        if ticket.status == TicketStatus::Completed {
            self.redistribute(&ticket, &assignees).await?;
        }
        self.audit(&ticket, actor, actions::UNASSIGN, json!({ "removed": removed }))
            .await;
        Ok(assignees)
    }

    // -- points -------------------------------------------------------------

    /// Replace the ticket's distribution with an even split of `total` over
    /// `assignees`.
    pub async fn distribute_points(
        &self,
        ticket_id: DbId,
        total: f64,
        assignees: &[DbId],
    ) -> Result<Vec<UserScore>, CoreError> {
        let shares = distribution::split_evenly(total, assignees)?;
        self.store_shares(ticket_id, &shares).await
    }

    async fn distribute_from_basis(
        &self,
        ticket: &Ticket,
        assignees: &[DbId],
    ) -> Result<Vec<UserScore>, CoreError> {
        let shares = distribution::distribute(&PointBasis::for_ticket(ticket), assignees)?;
        self.store_shares(ticket.id, &shares).await
    }

    async fn store_shares(
        &self,
        ticket_id: DbId,
        shares: &[PointShare],
    ) -> Result<Vec<UserScore>, CoreError> {
        let rows = self
            .store
            .replace_scores(ticket_id, shares, Utc::now())
            .await?;
        tracing::info!(
            ticket_id = %ticket_id,
            total = shares.iter().map(|s| s.points).sum::<f64>(),
            assignees = rows.len(),
            "Points distributed",
        );
        Ok(rows)
    }

    /// A completed ticket whose point basis moved (its final score was
    /// corrected) gets its distribution recomputed for the current team.
    async fn rebase_points(&self, before: &Ticket, after: &Ticket) -> Result<(), CoreError> {
        if after.status != TicketStatus::Completed
            || PointBasis::for_ticket(before) == PointBasis::for_ticket(after)
        {
            return Ok(());
        }
        let assignees = self.store.list_assignees(after.id).await?;
        self.redistribute(after, &assignees).await
    }

    /// Recompute a completed ticket's distribution after its assignee set
    /// changed. With nobody left, the stale distribution is dropped.
    async fn redistribute(
        &self,
        ticket: &Ticket,
        assignees: &[UserSummary],
    ) -> Result<(), CoreError> {
        if assignees.is_empty() {
            self.store.clear_scores(ticket.id).await?;
            tracing::warn!(ticket_id = %ticket.id, "Completed ticket has no assignees left");
            return Ok(());
        }
        let ids: Vec<DbId> = assignees.iter().map(|u| u.id).collect();
        self.distribute_from_basis(ticket, &ids).await?;
        Ok(())
    }

    // -- comments -----------------------------------------------------------

    pub async fn add_comment(
        &self,
        actor: &Actor,
        id: DbId,
        body: &str,
    ) -> Result<Comment, CoreError> {
        policy::authorize_comment(actor)?;
        ticket::validate_comment_body(body)?;
        let ticket = self.load(id).await?;

        let comment = Comment {
            id: uuid::Uuid::now_v7(),
            ticket_id: id,
            author_id: actor.id,
            body: body.trim().to_string(),
            is_system_generated: false,
            created_at: Utc::now(),
        };
        let saved = self.store.insert_comment(&comment).await?;
        tracing::info!(ticket_id = %id, comment_id = %saved.id, "Comment added");
        self.audit(
            &ticket,
            actor,
            actions::ADD_COMMENT,
            json!({ "commentId": saved.id }),
        )
        .await;
        Ok(saved)
    }

    // -- side effects -------------------------------------------------------

    async fn narrate(&self, ticket_id: DbId, body: String) {
        let comment = Comment::system(ticket_id, body, Utc::now());
        if let Err(e) = self.store.insert_comment(&comment).await {
            tracing::warn!(ticket_id = %ticket_id, error = %e, "Failed to store narration comment");
        }
    }

    async fn audit(&self, ticket: &Ticket, actor: &Actor, action: &str, payload: serde_json::Value) {
        let entry = audit::entry(ticket.id, actor, action, &payload);
        if let Err(e) = self.store.record_audit(&entry).await {
            tracing::warn!(ticket_id = %ticket.id, action, error = %e, "Failed to record audit entry");
        }
    }
}

fn dedup(ids: &[DbId]) -> Result<Vec<DbId>, CoreError> {
    let mut out: Vec<DbId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    if out.is_empty() {
        return Err(CoreError::Validation("At least one user id is required".into()));
    }
    Ok(out)
}

fn fields_snapshot(t: &Ticket) -> serde_json::Value {
    json!({
        "initialType": t.initial_type,
        "resolvedType": t.resolved_type,
        "priority": t.priority,
        "impactScore": t.impact_score,
        "urgencyScore": t.urgency_score,
        "finalScore": t.final_score,
        "redFlag": t.red_flag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effort::{Development, Security};
    use crate::error::DenialReason;
    use crate::memory::MemoryStore;
    use crate::policy::CONTACT_REQUIRED_MESSAGE;
    use crate::roles::Role;
    use crate::ticket::Priority;
    use assert_matches::assert_matches;

    struct Fixture {
        store: Arc<MemoryStore>,
        engine: TicketEngine,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(MemoryStore::new());
            let engine = TicketEngine::new(store.clone());
            Self { store, engine }
        }

        fn user(&self, name: &str, role: Role) -> Actor {
            let id = uuid::Uuid::now_v7();
            self.store
                .insert_user(UserSummary {
                    id,
                    name: name.into(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    role,
                })
                .unwrap();
            Actor::user(id, role)
        }

        async fn ticket(&self, actor: &Actor, initial_type: InitialType) -> Ticket {
            self.engine
                .create(actor, create(initial_type))
                .await
                .unwrap()
        }

        async fn system_comments(&self, id: DbId) -> Vec<String> {
            self.store
                .list_comments(id)
                .await
                .unwrap()
                .into_iter()
                .filter(|c| c.is_system_generated)
                .map(|c| c.body)
                .collect()
        }
    }

    fn create(initial_type: InitialType) -> CreateTicket {
        CreateTicket {
            initial_type,
            title: "Payroll export fails".into(),
            description: "Since Monday".into(),
            details: Details::new(),
            contact_email: None,
            contact_phone: None,
            red_flags_data: None,
            impact_assessment_data: None,
            urgency_timeline_data: None,
        }
    }

    fn full_effort() -> EffortInput {
        EffortInput {
            development: Development {
                version_control: true,
                external_service: true,
                internal_integration: true,
            },
            security: Security {
                access_control: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    // -- creation -----------------------------------------------------------

    #[tokio::test]
    async fn anonymous_issue_report_with_contact_is_created_pending() {
        let fx = Fixture::new();
        let mut req = create(InitialType::IssueReport);
        req.contact_email = Some("a@b.com".into());
        let t = fx.engine.create(&Actor::anonymous(), req).await.unwrap();
        assert_eq!(t.status, TicketStatus::Pending);
        assert_eq!(t.created_by, None);
        assert_eq!(t.contact_email.as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn anonymous_without_contact_is_a_validation_error() {
        let fx = Fixture::new();
        let mut req = create(InitialType::IssueReport);
        req.contact_email = Some("  ".into());
        let result = fx.engine.create(&Actor::anonymous(), req).await;
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg == CONTACT_REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn user_cannot_create_data_correction_request() {
        let fx = Fixture::new();
        let user = fx.user("Uma", Role::User);
        let result = fx
            .engine
            .create(&user, create(InitialType::ServiceRequestDataCorrection))
            .await;
        assert_matches!(
            result,
            Err(CoreError::Forbidden {
                reason: DenialReason::RoleNotPermitted,
                ..
            })
        );
    }

    #[tokio::test]
    async fn creation_scores_priority_from_blobs() {
        let fx = Fixture::new();
        let user = fx.user("Uma", Role::User);
        let mut req = create(InitialType::IssueReport);
        req.impact_assessment_data = Some(json!({ "lostRevenue": true, "coreProcesses": true }));
        req.urgency_timeline_data = Some(json!("8-30d"));
        let t = fx.engine.create(&user, req).await.unwrap();
        assert_eq!(t.impact_score, 4);
        assert_eq!(t.urgency_score, 2);
        assert_eq!(t.final_score, 6);
        assert_eq!(t.priority, Priority::P2);
        assert!(t.impact_assessment_data.is_some());
    }

    #[tokio::test]
    async fn invalid_contact_email_is_rejected() {
        let fx = Fixture::new();
        let mut req = create(InitialType::IssueReport);
        req.contact_email = Some("not-an-email".into());
        assert_matches!(
            fx.engine.create(&Actor::anonymous(), req).await,
            Err(CoreError::Validation(_))
        );
    }

    // -- edits --------------------------------------------------------------

    #[tokio::test]
    async fn owner_edit_is_narrated_in_one_batch() {
        let fx = Fixture::new();
        let user = fx.user("Uma", Role::User);
        let t = fx.ticket(&user, InitialType::ServiceRequestGeneral).await;
        fx.engine
            .update(
                &user,
                t.id,
                UpdateTicket {
                    title: Some("Payroll export broken".into()),
                    description: Some("Since Tuesday".into()),
                    details: None,
                },
            )
            .await
            .unwrap();
        let comments = fx.system_comments(t.id).await;
        assert_eq!(comments.len(), 1);
        assert!(comments[0].starts_with("Ticket updated by User:"));
        assert!(comments[0].contains("Description was updated"));
    }

    #[tokio::test]
    async fn no_op_edit_produces_no_narration() {
        let fx = Fixture::new();
        let user = fx.user("Uma", Role::User);
        let t = fx.ticket(&user, InitialType::ServiceRequestGeneral).await;
        fx.engine
            .update(
                &user,
                t.id,
                UpdateTicket {
                    title: Some(t.title.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(fx.system_comments(t.id).await.is_empty());
    }

    #[tokio::test]
    async fn non_owner_user_cannot_edit() {
        let fx = Fixture::new();
        let owner = fx.user("Owner", Role::User);
        let other = fx.user("Other", Role::User);
        let t = fx.ticket(&owner, InitialType::ServiceRequestGeneral).await;
        let result = fx
            .engine
            .update(
                &other,
                t.id,
                UpdateTicket {
                    title: Some("mine now".into()),
                    ..Default::default()
                },
            )
            .await;
        assert_matches!(
            result,
            Err(CoreError::Forbidden {
                reason: DenialReason::NotTicketOwner,
                ..
            })
        );
    }

    #[tokio::test]
    async fn field_override_narrates_each_change_in_one_comment() {
        let fx = Fixture::new();
        let boss = fx.user("Boss", Role::Manager);
        let t = fx.ticket(&boss, InitialType::IssueReport).await;
        let saved = fx
            .engine
            .override_fields(
                &boss,
                t.id,
                FieldOverrides {
                    priority: Some(Priority::P1),
                    final_score: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(saved.priority, Priority::P1);
        let comments = fx.system_comments(t.id).await;
        assert_eq!(
            comments,
            vec!["Ticket fields updated by Manager:\n\n\
                  Priority changed from \"P3\" to \"P1\"\n\
                  Final Score changed from 0 to 9"
                .to_string()]
        );
    }

    #[tokio::test]
    async fn users_cannot_override_fields() {
        let fx = Fixture::new();
        let user = fx.user("Uma", Role::User);
        let t = fx.ticket(&user, InitialType::IssueReport).await;
        let result = fx
            .engine
            .override_fields(
                &user,
                t.id,
                FieldOverrides {
                    priority: Some(Priority::P0),
                    ..Default::default()
                },
            )
            .await;
        assert_matches!(result, Err(CoreError::Forbidden { .. }));
    }

    // -- classification -----------------------------------------------------

    #[tokio::test]
    async fn issue_report_is_classified_once() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        let saved = fx
            .engine
            .classify(&sup, t.id, ResolvedType::EmergencyChange)
            .await
            .unwrap();
        assert_eq!(saved.resolved_type, Some(ResolvedType::EmergencyChange));
        assert_matches!(
            fx.engine
                .classify(&sup, t.id, ResolvedType::DataCorrection)
                .await,
            Err(CoreError::Precondition(_))
        );
    }

    #[tokio::test]
    async fn classifying_other_types_fails() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let t = fx.ticket(&sup, InitialType::ChangeRequestNormal).await;
        assert_matches!(
            fx.engine
                .classify(&sup, t.id, ResolvedType::DataCorrection)
                .await,
            Err(CoreError::Precondition(_))
        );
    }

    // -- status -------------------------------------------------------------

    #[tokio::test]
    async fn completing_without_assignees_leaves_ticket_untouched() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        fx.engine
            .change_status(&sup, t.id, TicketStatus::InProgress, None)
            .await
            .unwrap();
        let before = fx.system_comments(t.id).await.len();

        let result = fx
            .engine
            .change_status(&sup, t.id, TicketStatus::Completed, None)
            .await;
        assert_matches!(result, Err(CoreError::Precondition(_)));

        let stored = fx.store.find_ticket(t.id).await.unwrap().unwrap();
        assert_eq!(stored.status, TicketStatus::InProgress);
        assert!(stored.closed_at.is_none());
        assert_eq!(fx.system_comments(t.id).await.len(), before);
    }

    #[tokio::test]
    async fn status_change_is_narrated() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        fx.engine
            .change_status(&sup, t.id, TicketStatus::InProgress, None)
            .await
            .unwrap();
        assert_eq!(
            fx.system_comments(t.id).await,
            vec!["Status changed from pending to in_progress by Supervisor".to_string()]
        );
    }

    #[tokio::test]
    async fn same_status_is_a_no_op() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        let same = fx
            .engine
            .change_status(&sup, t.id, TicketStatus::Pending, None)
            .await
            .unwrap();
        assert_eq!(same, t);
        assert!(fx.system_comments(t.id).await.is_empty());
    }

    #[tokio::test]
    async fn completion_distributes_effort_points() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let a = fx.user("Ann", Role::User);
        let b = fx.user("Ben", Role::User);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        fx.engine
            .assign(&sup, t.id, &[a.id.unwrap(), b.id.unwrap()])
            .await
            .unwrap();
        fx.engine
            .change_status(&sup, t.id, TicketStatus::InProgress, None)
            .await
            .unwrap();
        let done = fx
            .engine
            .change_status(&sup, t.id, TicketStatus::Completed, Some(full_effort()))
            .await
            .unwrap();

        assert!(done.closed_at.is_some());
        assert_eq!(done.effort_score, 4);
        // base 4 + bonus 2 * 2 people = 8, split evenly.
        let points = fx.engine.points(t.id).await.unwrap();
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.points == 4.0));
    }

    #[tokio::test]
    async fn completion_without_effort_uses_final_score() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let a = fx.user("Ann", Role::User);
        let mut req = create(InitialType::IssueReport);
        req.impact_assessment_data = Some(json!({ "dataLoss": true }));
        req.urgency_timeline_data = Some(json!("3-7d"));
        let t = fx.engine.create(&sup, req).await.unwrap();
        fx.engine.assign(&sup, t.id, &[a.id.unwrap()]).await.unwrap();
        fx.engine
            .change_status(&sup, t.id, TicketStatus::InProgress, None)
            .await
            .unwrap();
        fx.engine
            .change_status(&sup, t.id, TicketStatus::Completed, None)
            .await
            .unwrap();
        let points = fx.engine.points(t.id).await.unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].points, 5.0);
    }

    #[tokio::test]
    async fn final_score_correction_on_completed_ticket_replaces_points() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let a = fx.user("Ann", Role::User);
        let b = fx.user("Ben", Role::User);
        let mut req = create(InitialType::IssueReport);
        req.impact_assessment_data = Some(json!({ "dataLoss": true }));
        req.urgency_timeline_data = Some(json!("3-7d"));
        let t = fx.engine.create(&sup, req).await.unwrap();
        fx.engine.assign(&sup, t.id, &[a.id.unwrap()]).await.unwrap();
        fx.engine
            .change_status(&sup, t.id, TicketStatus::InProgress, None)
            .await
            .unwrap();
        fx.engine
            .change_status(&sup, t.id, TicketStatus::Completed, None)
            .await
            .unwrap();

        fx.engine
            .override_fields(
                &sup,
                t.id,
                FieldOverrides {
                    final_score: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let points = fx.engine.points(t.id).await.unwrap();
        assert_eq!(points.iter().map(|p| p.points).collect::<Vec<_>>(), vec![9.0]);

        fx.engine.assign(&sup, t.id, &[b.id.unwrap()]).await.unwrap();
        let points = fx.engine.points(t.id).await.unwrap();
        assert_eq!(points.iter().map(|p| p.points).sum::<f64>(), 9.0);
    }

    #[tokio::test]
    async fn assessment_change_on_completed_ticket_replaces_points() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let a = fx.user("Ann", Role::User);
        let mut req = create(InitialType::IssueReport);
        req.impact_assessment_data = Some(json!({ "dataLoss": true }));
        req.urgency_timeline_data = Some(json!("3-7d"));
        let t = fx.engine.create(&sup, req).await.unwrap();
        fx.engine.assign(&sup, t.id, &[a.id.unwrap()]).await.unwrap();
        fx.engine
            .change_status(&sup, t.id, TicketStatus::InProgress, None)
            .await
            .unwrap();
        fx.engine
            .change_status(&sup, t.id, TicketStatus::Completed, None)
            .await
            .unwrap();
        assert_eq!(fx.engine.points(t.id).await.unwrap()[0].points, 5.0);

        let saved = fx
            .engine
            .update_assessment(
                &sup,
                t.id,
                AssessmentKind::ImpactAssessment,
                json!({ "dataLoss": true, "lostRevenue": true }),
            )
            .await
            .unwrap();
        let points = fx.engine.points(t.id).await.unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].points, f64::from(saved.final_score));
        assert_ne!(saved.final_score, 5);
    }

    #[tokio::test]
    async fn red_flag_override_is_narrated() {
        let fx = Fixture::new();
        let boss = fx.user("Boss", Role::Manager);
        let t = fx.ticket(&boss, InitialType::IssueReport).await;
        let saved = fx
            .engine
            .override_fields(
                &boss,
                t.id,
                FieldOverrides {
                    red_flag: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(saved.red_flag);
        let comments = fx.system_comments(t.id).await;
        assert_eq!(
            comments.last().map(String::as_str),
            Some("Ticket fields updated by Manager:\n\nRed Flag was set")
        );
    }

    #[tokio::test]
    async fn reopening_clears_distribution() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let a = fx.user("Ann", Role::User);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        fx.engine.assign(&sup, t.id, &[a.id.unwrap()]).await.unwrap();
        for to in [TicketStatus::InProgress, TicketStatus::Completed] {
            fx.engine.change_status(&sup, t.id, to, None).await.unwrap();
        }
        let reopened = fx
            .engine
            .change_status(&sup, t.id, TicketStatus::InProgress, None)
            .await
            .unwrap();
        assert!(reopened.closed_at.is_none());
        assert!(fx.engine.points(t.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn effort_only_accompanies_completion() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        assert_matches!(
            fx.engine
                .change_status(&sup, t.id, TicketStatus::InProgress, Some(full_effort()))
                .await,
            Err(CoreError::Validation(_))
        );
    }

    #[tokio::test]
    async fn user_cancels_only_own_ticket() {
        let fx = Fixture::new();
        let owner = fx.user("Owner", Role::User);
        let other = fx.user("Other", Role::User);
        let t = fx.ticket(&owner, InitialType::ServiceRequestGeneral).await;
        assert_matches!(
            fx.engine
                .change_status(&other, t.id, TicketStatus::Canceled, None)
                .await,
            Err(CoreError::Forbidden {
                reason: DenialReason::NotTicketOwner,
                ..
            })
        );
        let canceled = fx
            .engine
            .change_status(&owner, t.id, TicketStatus::Canceled, None)
            .await
            .unwrap();
        assert!(canceled.closed_at.is_some());
    }

    // -- assignment ---------------------------------------------------------

    #[tokio::test]
    async fn duplicate_assign_is_idempotent_and_not_narrated() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let a = fx.user("Ann", Role::User);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        let first = fx.engine.assign(&sup, t.id, &[a.id.unwrap()]).await.unwrap();
        let second = fx.engine.assign(&sup, t.id, &[a.id.unwrap()]).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            fx.system_comments(t.id).await,
            vec!["Assigned to Ann (User)".to_string()]
        );
    }

    #[tokio::test]
    async fn each_addition_gets_its_own_comment() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let a = fx.user("Ann", Role::User);
        let b = fx.user("Ben", Role::User);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        let list = fx
            .engine
            .assign(&sup, t.id, &[a.id.unwrap(), b.id.unwrap()])
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(fx.system_comments(t.id).await.len(), 2);
    }

    #[tokio::test]
    async fn user_may_only_self_assign() {
        let fx = Fixture::new();
        let user = fx.user("Uma", Role::User);
        let other = fx.user("Ozzy", Role::User);
        let t = fx.ticket(&user, InitialType::IssueReport).await;
        assert!(fx.engine.assign(&user, t.id, &[user.id.unwrap()]).await.is_ok());
        assert_matches!(
            fx.engine.assign(&user, t.id, &[other.id.unwrap()]).await,
            Err(CoreError::Forbidden { .. })
        );
    }

    #[tokio::test]
    async fn assigning_unknown_user_is_not_found() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        assert_matches!(
            fx.engine.assign(&sup, t.id, &[uuid::Uuid::now_v7()]).await,
            Err(CoreError::NotFound { entity: "user", .. })
        );
    }

    #[tokio::test]
    async fn unassign_narrates_and_skips_strangers() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let a = fx.user("Ann", Role::User);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        fx.engine.assign(&sup, t.id, &[a.id.unwrap()]).await.unwrap();
        let left = fx
            .engine
            .unassign(&sup, t.id, &[a.id.unwrap(), uuid::Uuid::now_v7()])
            .await
            .unwrap();
        assert!(left.is_empty());
        assert_eq!(
            fx.system_comments(t.id).await.last().map(String::as_str),
            Some("Unassigned Ann (User)")
        );
    }

    #[tokio::test]
    async fn assignee_change_on_completed_ticket_redistributes() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let a = fx.user("Ann", Role::User);
        let b = fx.user("Ben", Role::User);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        fx.engine.assign(&sup, t.id, &[a.id.unwrap()]).await.unwrap();
        fx.engine
            .change_status(&sup, t.id, TicketStatus::InProgress, None)
            .await
            .unwrap();
        fx.engine
            .change_status(&sup, t.id, TicketStatus::Completed, Some(full_effort()))
            .await
            .unwrap();
        assert_eq!(fx.engine.points(t.id).await.unwrap()[0].points, 4.0);

        fx.engine.assign(&sup, t.id, &[b.id.unwrap()]).await.unwrap();
        let points = fx.engine.points(t.id).await.unwrap();
        assert_eq!(points.len(), 2);
        // base 4 over two people plus bonus 2 each.
        assert!(points.iter().all(|p| p.points == 4.0));
    }

    #[tokio::test]
    async fn distribute_points_twice_replaces_rows() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let a = fx.user("Ann", Role::User);
        let b = fx.user("Ben", Role::User);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        let team = [a.id.unwrap(), b.id.unwrap()];
        let first = fx.engine.distribute_points(t.id, 10.0, &team).await.unwrap();
        fx.engine.distribute_points(t.id, 10.0, &team).await.unwrap();
        let stored = fx.engine.points(t.id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(
            stored.iter().map(|s| s.points).collect::<Vec<_>>(),
            first.iter().map(|s| s.points).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn distributing_to_nobody_is_a_contract_violation() {
        let fx = Fixture::new();
        assert_matches!(
            fx.engine
                .distribute_points(uuid::Uuid::now_v7(), 5.0, &[])
                .await,
            Err(CoreError::ContractViolation(_))
        );
    }

    // -- assessments, comments, reads -------------------------------------

    #[tokio::test]
    async fn red_flag_assessment_forces_p0() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let mut req = create(InitialType::IssueReport);
        req.impact_assessment_data = Some(json!({ "lostRevenue": true }));
        let t = fx.engine.create(&sup, req).await.unwrap();
        let saved = fx
            .engine
            .update_assessment(
                &sup,
                t.id,
                AssessmentKind::RedFlags,
                json!({ "outage": true }),
            )
            .await
            .unwrap();
        assert_eq!(saved.priority, Priority::P0);
        assert_eq!(saved.final_score, 10);
        assert_eq!(saved.impact_score, 0);
        assert!(saved.red_flag);
        let comments = fx.system_comments(t.id).await;
        assert_eq!(comments.len(), 1);
        assert!(comments[0].starts_with("Priority assessment updated by Supervisor:"));
        assert!(comments[0].contains("Red Flag was set"));
    }

    #[tokio::test]
    async fn comments_are_validated_and_authored() {
        let fx = Fixture::new();
        let user = fx.user("Uma", Role::User);
        let t = fx.ticket(&user, InitialType::IssueReport).await;
        assert_matches!(
            fx.engine.add_comment(&user, t.id, "   ").await,
            Err(CoreError::Validation(_))
        );
        let c = fx.engine.add_comment(&user, t.id, "On it").await.unwrap();
        assert_eq!(c.author_id, user.id);
        assert!(!c.is_system_generated);
    }

    #[tokio::test]
    async fn detail_exposes_legacy_assignee_id() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let a = fx.user("Ann", Role::User);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        assert_eq!(fx.engine.detail(t.id).await.unwrap().assignee_id, None);
        fx.engine.assign(&sup, t.id, &[a.id.unwrap()]).await.unwrap();
        let detail = fx.engine.detail(t.id).await.unwrap();
        assert_eq!(detail.assignee_id, a.id);
        assert_eq!(detail.comments.len(), 1);
    }

    #[tokio::test]
    async fn user_search_requires_a_signed_in_caller() {
        let fx = Fixture::new();
        let sam = fx.user("Sam", Role::Supervisor);
        fx.user("Ann", Role::User);
        fx.user("Anders", Role::Supervisor);

        let filter = UserFilter {
            q: Some("an".into()),
            role: Some(Role::User),
        };
        let found = fx.engine.search_users(&sam, &filter).await.unwrap();
        assert_eq!(
            found.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
            vec!["Ann"]
        );
        assert_matches!(
            fx.engine
                .search_users(&Actor::anonymous(), &UserFilter::default())
                .await,
            Err(CoreError::Forbidden { .. })
        );
    }

    #[tokio::test]
    async fn missing_ticket_is_not_found() {
        let fx = Fixture::new();
        assert_matches!(
            fx.engine.detail(uuid::Uuid::now_v7()).await,
            Err(CoreError::NotFound { entity: "ticket", .. })
        );
    }

    #[tokio::test]
    async fn mutations_are_audited() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        let t = fx.ticket(&sup, InitialType::IssueReport).await;
        fx.engine
            .change_status(&sup, t.id, TicketStatus::InProgress, None)
            .await
            .unwrap();
        let actions: Vec<String> = fx
            .store
            .audit_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.action)
            .collect();
        assert_eq!(actions, vec!["create_ticket", "status_change"]);
    }

    #[tokio::test]
    async fn list_clamps_paging() {
        let fx = Fixture::new();
        let sup = fx.user("Sam", Role::Supervisor);
        fx.ticket(&sup, InitialType::IssueReport).await;
        let page = fx
            .engine
            .list(&TicketFilter::default(), Some(1000), Some(-4))
            .await
            .unwrap();
        assert_eq!(page.limit, 100);
        assert_eq!(page.offset, 0);
        assert_eq!(page.total, 1);
    }
}
