//! Startup seeding of the first administrator account.

use hotel_core::roles::ROLE_ADMIN;
use hotel_db::models::user::CreateUser;
use hotel_db::repositories::UserRepo;
use hotel_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::config::AdminSeed;
use crate::error::{AppError, AppResult};

/// Create the administrator described by `seed` unless that email already
/// has an account. Returns `true` when a user was created.
pub async fn ensure_admin(pool: &DbPool, seed: &AdminSeed) -> AppResult<bool> {
    if UserRepo::find_by_email(pool, &seed.email).await?.is_some() {
        tracing::debug!(email = %seed.email, "Bootstrap admin already exists");
        return Ok(false);
    }

    validate_password_strength(&seed.password).map_err(AppError::BadRequest)?;
    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: seed.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Created bootstrap admin");
    Ok(true)
}
