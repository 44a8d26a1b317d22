pub mod health;
pub mod tickets;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{metrics, scoring, users};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /priority/compute                 priority preview (public)
/// /effort/compute                   effort preview (public)
/// /rankings                         points leaderboard (public)
/// /metrics/summary                  ticket counts (public)
/// /users/search                     user lookup (signed in)
/// /tickets/...                      see routes::tickets
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/priority/compute", post(scoring::compute_priority))
        .route("/effort/compute", post(scoring::compute_effort))
        .route("/rankings", get(metrics::rankings))
        .route("/metrics/summary", get(metrics::summary))
        .route("/users/search", get(users::search_users))
        .nest("/tickets", tickets::router())
}
