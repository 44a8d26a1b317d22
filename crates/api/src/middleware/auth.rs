//! JWT-based actor extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tms_core::error::CoreError;
use tms_core::roles::{Actor, Role};
use tms_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: DbId,
    /// Never [`Role::Anonymous`].
    pub role: Role,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::user(self.user_id, self.role)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        bearer_user(parts, state)?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })
    }
}

/// The caller of a route that also admits anonymous requests.
///
/// No `Authorization` header yields [`Actor::anonymous`]; a header that is
/// present but invalid is still rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = bearer_user(parts, state)?
            .map(|user| user.actor())
            .unwrap_or_else(Actor::anonymous);
        Ok(CurrentActor(actor))
    }
}

fn bearer_user(parts: &Parts, state: &AppState) -> Result<Option<AuthUser>, AppError> {
    let Some(auth_header) = parts.headers.get("authorization") else {
        return Ok(None);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    let role = claims
        .role
        .parse::<Role>()
        .ok()
        .filter(|r| *r != Role::Anonymous)
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Token carries an unknown role".into(),
            ))
        })?;

    Ok(Some(AuthUser {
        user_id: claims.sub,
        role,
    }))
}
