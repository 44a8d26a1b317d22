//! Handlers for tickets: intake, listing, detail, edits, workflow and
//! comments.
//!
//! Authorization decisions live in the engine; extractors here only
//! establish who the caller is.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use tms_core::effort::EffortInput;
use tms_core::engine::{AssessmentKind, CreateTicket, UpdateTicket};
use tms_core::search::TicketFilter;
use tms_core::ticket::{ResolvedType, Ticket, TicketStatus};
use tms_core::types::DbId;
use tms_core::workflow::FieldOverrides;

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, CurrentActor};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub resolved_type: ResolvedType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    pub status: TicketStatus,
    /// Effort checklist; only accepted together with `completed`.
    pub effort_data: Option<EffortInput>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

// ---------------------------------------------------------------------------
// POST /tickets
// ---------------------------------------------------------------------------

/// Submit a ticket. Anonymous callers may submit issue reports when they
/// leave a contact email.
pub async fn create_ticket(
    CurrentActor(actor): CurrentActor,
    State(state): State<AppState>,
    Json(input): Json<CreateTicket>,
) -> AppResult<impl IntoResponse> {
    let ticket = state.engine.create(&actor, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}

// ---------------------------------------------------------------------------
// GET /tickets
// ---------------------------------------------------------------------------

pub async fn list_tickets(
    State(state): State<AppState>,
    Query(filter): Query<TicketFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = state.engine.list(&filter, page.limit, page.offset).await?;
    Ok(Json(ListResponse::from(page)))
}

// ---------------------------------------------------------------------------
// GET /tickets/{id}
// ---------------------------------------------------------------------------

pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = state.engine.detail(id).await?;
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// PATCH /tickets/{id}
// ---------------------------------------------------------------------------

/// Edit title, description or details.
pub async fn update_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTicket>,
) -> AppResult<impl IntoResponse> {
    let ticket = state.engine.update(&auth.actor(), id, input).await?;
    Ok(Json(DataResponse { data: ticket }))
}

// ---------------------------------------------------------------------------
// PATCH /tickets/{id}/fields
// ---------------------------------------------------------------------------

/// Override classification and scoring fields directly (staff only).
pub async fn override_fields(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(overrides): Json<FieldOverrides>,
) -> AppResult<impl IntoResponse> {
    let ticket = state
        .engine
        .override_fields(&auth.actor(), id, overrides)
        .await?;
    Ok(Json(DataResponse { data: ticket }))
}

// ---------------------------------------------------------------------------
// POST /tickets/{id}/classify
// ---------------------------------------------------------------------------

pub async fn classify_ticket(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ClassifyRequest>,
) -> AppResult<impl IntoResponse> {
    let ticket = state
        .engine
        .classify(&auth.actor(), id, input.resolved_type)
        .await?;
    Ok(Json(DataResponse { data: ticket }))
}

// ---------------------------------------------------------------------------
// POST /tickets/{id}/status
// ---------------------------------------------------------------------------

/// Move a ticket through the workflow. Completing a ticket distributes
/// points to its assignees.
pub async fn change_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusChangeRequest>,
) -> AppResult<impl IntoResponse> {
    let ticket = state
        .engine
        .change_status(&auth.actor(), id, input.status, input.effort_data)
        .await?;
    Ok(Json(DataResponse { data: ticket }))
}

// ---------------------------------------------------------------------------
// PUT /tickets/{id}/red-flags | impact-assessment | urgency-timeline
// ---------------------------------------------------------------------------

pub async fn update_red_flags(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(blob): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    update_assessment(state, auth, id, AssessmentKind::RedFlags, blob).await
}

pub async fn update_impact_assessment(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(blob): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    update_assessment(state, auth, id, AssessmentKind::ImpactAssessment, blob).await
}

pub async fn update_urgency_timeline(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(blob): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    update_assessment(state, auth, id, AssessmentKind::UrgencyTimeline, blob).await
}

async fn update_assessment(
    state: AppState,
    auth: AuthUser,
    id: DbId,
    kind: AssessmentKind,
    blob: serde_json::Value,
) -> AppResult<Json<DataResponse<Ticket>>> {
    let ticket = state
        .engine
        .update_assessment(&auth.actor(), id, kind, blob)
        .await?;
    Ok(Json(DataResponse { data: ticket }))
}

// ---------------------------------------------------------------------------
// GET /tickets/{id}/points
// ---------------------------------------------------------------------------

/// Current point distribution for a ticket.
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let points = state.engine.points(id).await?;
    Ok(Json(DataResponse { data: points }))
}

// ---------------------------------------------------------------------------
// POST /tickets/{id}/comments
// ---------------------------------------------------------------------------

pub async fn add_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CommentRequest>,
) -> AppResult<impl IntoResponse> {
    let comment = state
        .engine
        .add_comment(&auth.actor(), id, &input.body)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
