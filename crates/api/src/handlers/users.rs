//! User lookup backing the assignee picker.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use tms_core::search::UserFilter;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /users/search?q=&role=
pub async fn search_users(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> AppResult<impl IntoResponse> {
    let users = state.engine.search_users(&auth.actor(), &filter).await?;
    Ok(Json(DataResponse { data: users }))
}
