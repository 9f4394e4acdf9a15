//! Access guard: resolves the caller's identity before a handler runs.
//!
//! Three composable stages, all declared in handler signatures:
//! [`AuthUser`] (must be authenticated), [`AdminUser`] (must also hold the
//! admin role) and [`OptionalUser`] (never rejects; anonymous on a missing
//! or bad token).

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::constants::{AUTH_COOKIE, roles};
use crate::services::{ClientMeta, TokenError};

/// Resolved identity of an authenticated request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub role: String,
}

impl AuthUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }
}

/// Second guard stage: authenticated and admin, `Forbidden` otherwise.
pub struct AdminUser(pub AuthUser);

/// Optional-auth variant for public reads that show more to admins.
pub struct OptionalUser(pub Option<AuthUser>);

impl OptionalUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(AuthUser::is_admin)
    }
}

/// Token transport: the auth cookie, then `Authorization: Bearer`.
fn extract_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(AUTH_COOKIE) {
        return Some(cookie.value().to_string());
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

async fn resolve_user(parts: &Parts, state: &AppState) -> Result<AuthUser, ApiError> {
    let token = extract_token(parts).ok_or_else(ApiError::unauthorized)?;

    let claims = state.tokens.decode(&token).map_err(|e| match e {
        TokenError::Expired => ApiError::Unauthorized("Token expired".to_string()),
        TokenError::Invalid => ApiError::Unauthorized("Invalid token".to_string()),
    })?;

    // The token is self-contained, but the account must still exist and be
    // active at request time.
    let user = state
        .store
        .users()
        .find_by_id(claims.sub)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to load user: {e}")))?;

    let Some(user) = user else {
        return Err(ApiError::unauthorized());
    };

    if !user.is_active {
        return Err(ApiError::unauthorized());
    }

    Ok(AuthUser {
        id: user.id,
        email: user.email,
        role: user.role,
    })
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        resolve_user(parts, state).await
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = resolve_user(parts, state).await?;

        if !user.is_admin() {
            return Err(ApiError::forbidden());
        }

        Ok(Self(user))
    }
}

impl FromRequestParts<Arc<AppState>> for OptionalUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_user(parts, state).await.ok()))
    }
}

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
