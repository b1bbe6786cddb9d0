use std::path::PathBuf;

use chrono::Duration;

use crate::auth::tokens::TokenConfig;

/// Default maximum accepted image upload (10 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Access and refresh token settings.
    pub tokens: TokenConfig,
    /// Room image storage.
    pub media: MediaConfig,
    /// Administrator created at startup if missing.
    pub bootstrap_admin: Option<AdminSeed>,
}

/// Where room images live on disk and how they are addressed publicly.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub root: PathBuf,
    /// Prefix of every stored image URL. Also the mount path of the static
    /// file service, so it must start with `/`.
    pub public_url: String,
    pub max_upload_bytes: usize,
}

#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `JWT_SECRET`              | required                |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | `15`                    |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | `7`                     |
    /// | `MEDIA_ROOT`              | `storage/room-images`   |
    /// | `MEDIA_PUBLIC_URL`        | `/media`                |
    /// | `MAX_UPLOAD_BYTES`        | `10485760`              |
    /// | `ADMIN_EMAIL`             | unset                   |
    /// | `ADMIN_PASSWORD`          | unset                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let media = MediaConfig::from_env();

        let bootstrap_admin = match (
            std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty()),
            std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        ) {
            (Some(email), Some(password)) => Some(AdminSeed {
                email: email.trim().to_string(),
                password,
            }),
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            tokens: tokens_from_env(),
            media,
            bootstrap_admin,
        }
    }
}

/// # Panics
///
/// Panics if `JWT_SECRET` is missing or empty, or an expiry does not parse.
fn tokens_from_env() -> TokenConfig {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
    assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

    let access_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
        .unwrap_or_else(|_| "15".into())
        .parse()
        .expect("JWT_ACCESS_EXPIRY_MINS must be a whole number of minutes");

    let refresh_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
        .unwrap_or_else(|_| "7".into())
        .parse()
        .expect("JWT_REFRESH_EXPIRY_DAYS must be a whole number of days");

    TokenConfig {
        secret,
        access_ttl: Duration::minutes(access_mins),
        refresh_ttl: Duration::days(refresh_days),
    }
}

impl MediaConfig {
    pub fn from_env() -> Self {
        let root = std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "storage/room-images".into());

        let public_url = std::env::var("MEDIA_PUBLIC_URL").unwrap_or_else(|_| "/media".into());
        let public_url = public_url.trim_end_matches('/').to_string();
        assert!(
            public_url.starts_with('/') && public_url.len() > 1,
            "MEDIA_PUBLIC_URL must be an absolute path such as /media"
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            root: PathBuf::from(root),
            public_url,
            max_upload_bytes,
        }
    }
}
