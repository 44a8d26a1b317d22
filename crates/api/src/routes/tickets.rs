//! Route definitions for tickets.
//!
//! Mounted at `/tickets` by `api_routes()`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{assignments, tickets};
use crate::state::AppState;

/// Largest accepted request body on ticket routes. Descriptions, comments
/// and questionnaire blobs fit comfortably below it.
pub const TICKET_BODY_LIMIT: usize = 256 * 1024;

/// Ticket routes.
///
/// ```text
/// POST   /                          -> create_ticket (anonymous allowed)
/// GET    /                          -> list_tickets
/// GET    /{id}                      -> get_ticket
/// PATCH  /{id}                      -> update_ticket
/// PATCH  /{id}/fields               -> override_fields (staff)
/// POST   /{id}/classify             -> classify_ticket (staff)
/// POST   /{id}/status               -> change_status
/// POST   /{id}/assign               -> assign
/// DELETE /{id}/assign               -> unassign
/// GET    /{id}/points               -> get_points
/// POST   /{id}/comments             -> add_comment
/// PUT    /{id}/red-flags            -> update_red_flags (staff)
/// PUT    /{id}/impact-assessment    -> update_impact_assessment (staff)
/// PUT    /{id}/urgency-timeline     -> update_urgency_timeline (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(tickets::create_ticket).get(tickets::list_tickets),
        )
        .route(
            "/{id}",
            get(tickets::get_ticket).patch(tickets::update_ticket),
        )
        .route("/{id}/fields", patch(tickets::override_fields))
        .route("/{id}/classify", post(tickets::classify_ticket))
        .route("/{id}/status", post(tickets::change_status))
        .route(
            "/{id}/assign",
            post(assignments::assign).delete(assignments::unassign),
        )
        .route("/{id}/points", get(tickets::get_points))
        .route("/{id}/comments", post(tickets::add_comment))
        .route("/{id}/red-flags", put(tickets::update_red_flags))
        .route(
            "/{id}/impact-assessment",
            put(tickets::update_impact_assessment),
        )
        .route(
            "/{id}/urgency-timeline",
            put(tickets::update_urgency_timeline),
        )
        .layer(DefaultBodyLimit::max(TICKET_BODY_LIMIT))
}
