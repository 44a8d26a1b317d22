//! Stateless scoring previews for the intake questionnaire and the
//! completion checklist.

use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use tms_core::effort::{self, EffortInput};
use tms_core::priority::{self, PriorityInput};

use crate::error::AppResult;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortPreviewRequest {
    #[serde(flatten)]
    pub checklist: EffortInput,
    /// Team size to split over; defaults to one person.
    pub assignee_count: Option<i64>,
}

/// POST /priority/compute
pub async fn compute_priority(Json(input): Json<PriorityInput>) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: priority::compute(&input),
    }))
}

/// POST /effort/compute
pub async fn compute_effort(
    Json(input): Json<EffortPreviewRequest>,
) -> AppResult<impl IntoResponse> {
    let breakdown = effort::assess(&input.checklist, input.assignee_count.unwrap_or(1));
    Ok(Json(DataResponse { data: breakdown }))
}
