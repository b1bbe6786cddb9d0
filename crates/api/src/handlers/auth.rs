//! Handlers for the `/auth` resource (login, refresh, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hotel_core::error::CoreError;
use hotel_db::models::session::NewSession;
use hotel_db::models::user::{User, UserResponse};
use hotel_db::repositories::{Rotation, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::auth::tokens::{hash_refresh_token, issue_access_token, RefreshToken};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Consecutive failed logins that lock the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Lock duration after too many failures.
const LOCK_DURATION_MINS: i64 = 15;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

const INVALID_REFRESH: &str = "Invalid or expired refresh token";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| unauthorized(INVALID_CREDENTIALS))?;

    ensure_active(&user)?;

    let now = Utc::now();
    if user.locked_until.is_some_and(|until| until > now) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is temporarily locked. Try again later.".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let lock_until = now + chrono::Duration::minutes(LOCK_DURATION_MINS);
        let failure =
            UserRepo::record_failed_login(&state.pool, user.id, MAX_FAILED_ATTEMPTS, lock_until)
                .await?;
        if failure.failed_login_count >= MAX_FAILED_ATTEMPTS {
            tracing::warn!(
                user_id = user.id,
                locked_until = ?failure.locked_until,
                "Account locked after repeated failed sign-ins"
            );
        }
        return Err(unauthorized(INVALID_CREDENTIALS));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "Admin signed in");

    let refresh = RefreshToken::generate();
    SessionRepo::create(
        &state.pool,
        &NewSession {
            user_id: user.id,
            refresh_token_hash: &refresh.hash,
            expires_at: now + state.config.tokens.refresh_ttl,
        },
    )
    .await?;

    Ok(Json(auth_response(&state, user, refresh.plaintext)?))
}

/// POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new pair. A token that was already
/// exchanged once revokes every session of its account.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let next = RefreshToken::generate();
    let rotation = SessionRepo::rotate(
        &state.pool,
        &hash_refresh_token(&input.refresh_token),
        &next.hash,
        Utc::now() + state.config.tokens.refresh_ttl,
    )
    .await?;

    let session = match rotation {
        Rotation::Rotated(session) => session,
        Rotation::Replayed { user_id } => {
            let revoked = SessionRepo::revoke_all_for_user(&state.pool, user_id).await?;
            tracing::warn!(user_id, revoked, "Refresh token replayed, all sessions revoked");
            return Err(unauthorized(INVALID_REFRESH));
        }
        Rotation::Rejected => return Err(unauthorized(INVALID_REFRESH)),
    };

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| unauthorized(INVALID_REFRESH))?;
    if let Err(e) = ensure_active(&user) {
        SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;
        return Err(e);
    }

    Ok(Json(auth_response(&state, user, next.plaintext)?))
}

/// POST /api/v1/auth/logout
///
/// Revokes every session of the caller. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "Admin signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| unauthorized("Account no longer exists"))?;
    ensure_active(&user)?;
    Ok(Json(user.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}

fn ensure_active(user: &User) -> AppResult<()> {
    if user.is_active {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )))
    }
}

fn auth_response(state: &AppState, user: User, refresh_token: String) -> AppResult<AuthResponse> {
    let tokens = &state.config.tokens;
    let access_token = issue_access_token(user.id, &user.role, Utc::now(), tokens)
        .map_err(|e| AppError::InternalError(format!("Token signing error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: tokens.expires_in(),
        user: user.into(),
    })
}
