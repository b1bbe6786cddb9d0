//! Back office refresh sessions.

use hotel_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row of `admin_sessions`. The refresh token hash is never read back.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: DbId,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    /// Set when a refresh rotated this session into a newer one.
    pub replaced_by: Option<DbId>,
    pub created_at: Timestamp,
}

impl AdminSession {
    /// Whether the session's refresh token can still be exchanged at `now`.
    pub fn is_usable(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// A session about to be persisted.
#[derive(Debug, Clone, Copy)]
pub struct NewSession<'a> {
    pub user_id: DbId,
    /// SHA-256 hex of the refresh token handed to the client.
    pub refresh_token_hash: &'a str,
    pub expires_at: Timestamp,
}
