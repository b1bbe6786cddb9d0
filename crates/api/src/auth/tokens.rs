//! Back office credentials handed to the browser after sign-in.
//!
//! The access token is a short-lived HS256 JWT naming the administrator and
//! their role, issued by [`ISSUER`]. The refresh token is an opaque random
//! string; the server keeps only its SHA-256 hex digest.

use chrono::Duration;
use hotel_core::types::{DbId, Timestamp};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// `iss` claim of every access token this service signs.
pub const ISSUER: &str = "hotel-back-office";

/// Payload of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Account id.
    pub sub: DbId,
    pub role: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signing secret and lifetimes for both token kinds.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    /// Access token lifetime in seconds, as reported to clients.
    pub fn expires_in(&self) -> i64 {
        self.access_ttl.num_seconds()
    }
}

pub fn issue_access_token(
    user_id: DbId,
    role: &str,
    issued_at: Timestamp,
    config: &TokenConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = AccessClaims {
        sub: user_id,
        role: role.to_string(),
        iss: ISSUER.to_string(),
        iat: issued_at.timestamp(),
        exp: (issued_at + config.access_ttl).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature, expiry and issuer.
pub fn verify_access_token(
    token: &str,
    config: &TokenConfig,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss"]);
    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// A freshly minted refresh token. `plaintext` goes to the client, `hash`
/// to the database.
#[derive(Debug)]
pub struct RefreshToken {
    pub plaintext: String,
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let hash = hash_refresh_token(&plaintext);
        Self { plaintext, hash }
    }
}

pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
