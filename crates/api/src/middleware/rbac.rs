//! Gate for `/api/v1/admin` routes.
//!
//! The token's role claim is checked first, then the account row. A
//! deactivated or deleted administrator is turned away on the next request
//! even while their access token is still unexpired.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hotel_core::error::CoreError;
use hotel_core::roles::ROLE_ADMIN;
use hotel_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An administrator whose account is currently active.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = AuthUser::from_request_parts(parts, state).await?;

        if caller.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "The back office is limited to administrators".into(),
            )));
        }

        if !UserRepo::is_active_admin(&state.pool, caller.user_id).await? {
            tracing::info!(user_id = caller.user_id, "Refused token of inactive account");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Account is no longer active".into(),
            )));
        }

        Ok(Self(caller))
    }
}
