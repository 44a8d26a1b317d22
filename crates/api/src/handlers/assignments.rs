//! Handlers for adding and removing ticket assignees.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use tms_core::ticket::UserSummary;
use tms_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Who to assign or unassign.
///
/// `assigneeIds` is the current shape. `assigneeId` is accepted from
/// single-assignee clients, and `self: true` names the caller.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneesRequest {
    #[serde(default)]
    pub assignee_ids: Vec<DbId>,
    pub assignee_id: Option<DbId>,
    #[serde(default, rename = "self")]
    pub include_self: bool,
}

impl AssigneesRequest {
    /// Merge every form into one list, in request order.
    pub fn resolve(&self, caller: DbId) -> AppResult<Vec<DbId>> {
        let mut ids = self.assignee_ids.clone();
        ids.extend(self.assignee_id);
        if self.include_self {
            ids.push(caller);
        }
        if ids.is_empty() {
            return Err(AppError::BadRequest(
                "Provide assigneeIds, assigneeId or self".into(),
            ));
        }
        Ok(ids)
    }
}

#[derive(Debug, Serialize)]
pub struct AssigneesResponse {
    pub id: DbId,
    pub assignees: Vec<UserSummary>,
}

// ---------------------------------------------------------------------------
// POST /tickets/{id}/assign
// ---------------------------------------------------------------------------

/// Add assignees. Users may only assign themselves; staff may assign anyone.
pub async fn assign(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssigneesRequest>,
) -> AppResult<impl IntoResponse> {
    let ids = input.resolve(auth.user_id)?;
    let assignees = state.engine.assign(&auth.actor(), id, &ids).await?;
    Ok(Json(DataResponse {
        data: AssigneesResponse { id, assignees },
    }))
}

// ---------------------------------------------------------------------------
// DELETE /tickets/{id}/assign
// ---------------------------------------------------------------------------

pub async fn unassign(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssigneesRequest>,
) -> AppResult<impl IntoResponse> {
    let ids = input.resolve(auth.user_id)?;
    let assignees = state.engine.unassign(&auth.actor(), id, &ids).await?;
    Ok(Json(DataResponse {
        data: AssigneesResponse { id, assignees },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn resolve_merges_all_forms() {
        let caller = DbId::now_v7();
        let (a, b) = (DbId::now_v7(), DbId::now_v7());
        let req = AssigneesRequest {
            assignee_ids: vec![a],
            assignee_id: Some(b),
            include_self: true,
        };
        assert_eq!(req.resolve(caller).unwrap(), vec![a, b, caller]);
    }

    #[test]
    fn resolve_rejects_empty_request() {
        let req = AssigneesRequest::default();
        assert_matches!(req.resolve(DbId::now_v7()), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn self_flag_deserializes_from_reserved_name() {
        let req: AssigneesRequest = serde_json::from_str(r#"{"self": true}"#).unwrap();
        assert!(req.include_self);
        assert!(req.assignee_ids.is_empty());
    }
}
