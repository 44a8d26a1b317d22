//! Role-based access control extractors.
//!
//! Route-level gates. The engine still checks every operation against the
//! policy table.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tms_core::error::{CoreError, DenialReason};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `Supervisor` or `Manager`. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn staff_only(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_staff() {
            return Err(AppError::Core(CoreError::forbidden(
                DenialReason::RoleNotPermitted,
                "Supervisor or Manager role required",
            )));
        }
        Ok(RequireStaff(user))
    }
}
