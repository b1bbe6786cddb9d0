//! Persistence for back office refresh sessions.
//!
//! A refresh token is single use. Exchanging it revokes its session and
//! links it to the successor, so a second exchange of the same token is
//! recognizable as a replay rather than an ordinary stale token.

use chrono::Utc;
use hotel_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::session::{AdminSession, NewSession};

const COLUMNS: &str = "id, user_id, expires_at, revoked_at, replaced_by, created_at";

/// Outcome of [`SessionRepo::rotate`].
#[derive(Debug)]
pub enum Rotation {
    /// The presented session was retired and this one replaces it.
    Rotated(AdminSession),
    /// The token had already been rotated away.
    Replayed { user_id: DbId },
    /// Unknown, expired, or revoked by a logout.
    Rejected,
}

pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &NewSession<'_>,
    ) -> Result<AdminSession, sqlx::Error> {
        Self::insert(pool, input).await
    }

    /// Exchange the session behind `presented_hash` for a new one holding
    /// `next_hash`. The lookup, insert and retirement share one transaction
    /// and the presented row stays locked throughout, so two concurrent
    /// exchanges of one token cannot both succeed.
    pub async fn rotate(
        pool: &PgPool,
        presented_hash: &str,
        next_hash: &str,
        next_expires_at: Timestamp,
    ) -> Result<Rotation, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM admin_sessions
             WHERE refresh_token_hash = $1
             FOR UPDATE"
        );
        let current = sqlx::query_as::<_, AdminSession>(&query)
            .bind(presented_hash)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(current) = current else {
            return Ok(Rotation::Rejected);
        };
        if current.replaced_by.is_some() {
            return Ok(Rotation::Replayed {
                user_id: current.user_id,
            });
        }
        if !current.is_usable(Utc::now()) {
            return Ok(Rotation::Rejected);
        }

        let next = Self::insert(
            &mut *tx,
            &NewSession {
                user_id: current.user_id,
                refresh_token_hash: next_hash,
                expires_at: next_expires_at,
            },
        )
        .await?;

        sqlx::query("UPDATE admin_sessions SET revoked_at = NOW(), replaced_by = $2 WHERE id = $1")
            .bind(current.id)
            .bind(next.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Rotation::Rotated(next))
    }

    /// Revoke every open session of `user_id`. Returns how many were open.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET revoked_at = NOW()
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete expired sessions. Revoked ones are kept until they expire so
    /// replays stay detectable.
    pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &NewSession<'_>,
    ) -> Result<AdminSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(input.user_id)
            .bind(input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(executor)
            .await
    }
}
