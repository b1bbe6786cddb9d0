//! Administrator authentication.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`tokens`] -- access and refresh tokens.
//! - [`bootstrap`] -- creates the initial administrator at startup.

pub mod bootstrap;
pub mod password;
pub mod tokens;
