//! Read-only aggregates: the points leaderboard and ticket counts.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /rankings
pub async fn rankings(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let rows = state.engine.rankings(params.limit).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /metrics/summary
pub async fn summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let summary = state.engine.summary().await?;
    Ok(Json(DataResponse { data: summary }))
}
