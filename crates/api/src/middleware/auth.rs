//! JWT-based authentication extractors for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use bns_core::error::CoreError;
use bns_core::roles::is_staff;
use bns_core::types::DbId;

use crate::auth::jwt::{cookie_value, validate_token, ACCESS_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user, taken from `Authorization: Bearer <jwt>` or, for
/// browser sessions on the dashboard, the `bns_access` cookie.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// Role name from the token (`admin`, `editor`, `viewer`, ...).
    pub role: String,
}

impl AuthUser {
    pub fn is_staff(&self) -> bool {
        is_staff(&self.role)
    }
}

/// Raw token sent with the request, if any. The header wins over the cookie.
fn bearer_token(parts: &Parts) -> Result<Option<String>, AppError> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        let value = header.to_str().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Malformed Authorization header".into(),
            ))
        })?;
        let token = value.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;
        return Ok(Some(token.to_string()));
    }

    Ok(parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|header| cookie_value(header, ACCESS_COOKIE))
        .filter(|token| !token.is_empty()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Authentication credentials were not provided".into(),
            ))
        })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// The caller when valid credentials accompany the request, `None` for
/// anonymous callers and for bad or expired tokens.
///
/// Used on public routes that show staff more (drafts, unpublished items).
#[derive(Debug, Clone)]
pub struct MaybeAuth(pub Option<AuthUser>);

impl MaybeAuth {
    pub fn is_staff(&self) -> bool {
        self.0.as_ref().is_some_and(AuthUser::is_staff)
    }

    pub fn user_id(&self) -> Option<DbId> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

impl FromRequestParts<AppState> for MaybeAuth {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}
