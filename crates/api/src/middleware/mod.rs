//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by a Bearer access token.
//! - [`rbac::RequireAdmin`] -- an active account with the `admin` role.

pub mod auth;
pub mod rbac;
