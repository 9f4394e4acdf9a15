use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::guard::AuthUser;
use super::validation::require;
use super::{ApiError, ApiResponse, AppState};
use crate::constants::{AUTH_COOKIE, roles};
use crate::db::User;
use crate::services::audit::resources;
use crate::services::{AuditAction, ClientMeta};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub user: UserDto,
    pub token: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Cookie helpers
// ============================================================================

fn auth_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(state.config.auth.cookie_secure);
    cookie
}

fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, "");
    cookie.set_path("/");
    cookie
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
/// Bootstrap registration, restricted to the configured admin email.
pub async fn register(
    State(state): State<Arc<AppState>>,
    meta: ClientMeta,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    require(&payload.email, "Email")?;
    require(&payload.name, "Name")?;
    if payload.password.len() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }

    if !payload
        .email
        .eq_ignore_ascii_case(&state.config.auth.admin_email)
    {
        return Err(ApiError::Forbidden(
            "Registration is only allowed for the admin email".to_string(),
        ));
    }

    let users = state.store.users();

    let existing = users
        .find_by_email(&payload.email)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to check existing user: {e}")))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let user = users
        .create(
            &payload.email,
            &payload.password,
            &payload.name,
            roles::ADMIN,
            &state.config.security,
        )
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create user: {e}")))?;

    let token = state
        .tokens
        .issue(user.id, &user.email, &user.role)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    state
        .audit
        .record(user.id, AuditAction::Register, resources::AUTH, None, None, &meta)
        .await;

    let jar = jar.add(auth_cookie(&state, token.clone()));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::with_message(
            SessionResponse {
                user: user.into(),
                token,
            },
            "Admin registered successfully",
        )),
    ))
}

/// POST /auth/login
/// Issues a signed token as an HTTP-only cookie and in the response body.
pub async fn login(
    State(state): State<Arc<AppState>>,
    meta: ClientMeta,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    require(&payload.email, "Email")?;
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let users = state.store.users();

    let user = users
        .find_by_email(&payload.email)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to query user: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    if !user.is_active {
        return Err(ApiError::Forbidden("Account is inactive".to_string()));
    }

    let is_valid = users
        .verify_password(&payload.email, &payload.password)
        .await
        .map_err(|e| ApiError::internal(format!("Password verification error: {e}")))?;

    if !is_valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let token = state
        .tokens
        .issue(user.id, &user.email, &user.role)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    state
        .audit
        .record(user.id, AuditAction::Login, resources::AUTH, None, None, &meta)
        .await;

    let jar = jar.add(auth_cookie(&state, token.clone()));

    Ok((
        jar,
        Json(ApiResponse::with_message(
            SessionResponse {
                user: user.into(),
                token,
            },
            "Logged in successfully",
        )),
    ))
}

/// GET /auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state
        .store
        .users()
        .find_by_id(user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to load user: {e}")))?
        .ok_or_else(|| ApiError::not_found("User", user.id))?;

    Ok(Json(ApiResponse::success(user.into())))
}

/// POST /auth/logout
/// Clears the cookie. The token itself stays valid until expiry.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    meta: ClientMeta,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>), ApiError> {
    state
        .audit
        .record(user.id, AuditAction::Logout, resources::AUTH, None, None, &meta)
        .await;

    let jar = jar.remove(removal_cookie());

    Ok((
        jar,
        Json(ApiResponse::with_message((), "Logged out successfully")),
    ))
}

/// POST /auth/refresh
/// Reissues a token for the current identity.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<TokenResponse>>), ApiError> {
    let token = state
        .tokens
        .issue(user.id, &user.email, &user.role)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    let jar = jar.add(auth_cookie(&state, token.clone()));

    Ok((
        jar,
        Json(ApiResponse::with_message(
            TokenResponse { token },
            "Token refreshed successfully",
        )),
    ))
}
