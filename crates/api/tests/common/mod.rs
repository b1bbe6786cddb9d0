#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use hotel_api::auth::password::hash_password;
use hotel_api::auth::tokens::{issue_access_token, TokenConfig};
use hotel_api::config::{MediaConfig, ServerConfig};
use hotel_api::router::build_app_router;
use hotel_api::state::AppState;
use hotel_api::storage::LocalImageStore;
use hotel_core::clock::FixedClock;
use hotel_db::models::user::{CreateUser, User};
use hotel_db::repositories::UserRepo;

/// The date every test app believes is today.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 5, 1).unwrap()
}

pub fn test_tokens() -> TokenConfig {
    TokenConfig {
        secret: "hotel-integration-test-secret".to_string(),
        access_ttl: chrono::Duration::minutes(15),
        refresh_ttl: chrono::Duration::days(7),
    }
}

/// Build a test `ServerConfig` whose media root is a fresh temp directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        tokens: test_tokens(),
        media: MediaConfig {
            root: std::env::temp_dir().join(format!("hotel-media-{}", uuid::Uuid::new_v4())),
            public_url: "/media".to_string(),
            max_upload_bytes: 1024 * 1024,
        },
        bootstrap_admin: None,
    }
}

/// Build the full application router, with the same middleware stack as
/// `main.rs`, a fixed clock and a throwaway media directory.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_media(pool).0
}

/// Like [`build_test_app`], also returning the media root.
pub fn build_test_app_with_media(pool: PgPool) -> (Router, PathBuf) {
    let config = test_config();
    let root = config.media.root.clone();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images: Arc::new(LocalImageStore::new(root.clone(), config.media.public_url.clone())),
        clock: Arc::new(FixedClock(today())),
    };
    (build_app_router(state, &config), root)
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

pub const ADMIN_PASSWORD: &str = "reception-desk-42";

pub async fn create_admin(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
            role: "admin".to_string(),
        },
    )
    .await
    .unwrap()
}

/// Create an admin and sign an access token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    let user = create_admin(pool, "admin@hotel.test").await;
    issue_access_token(user.id, &user.role, chrono::Utc::now(), &test_tokens()).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Create a room through the admin API and return its JSON.
pub async fn create_room(
    app: Router,
    token: &str,
    name: &str,
    price: i32,
    status: &str,
) -> serde_json::Value {
    let response = post_json_auth(
        app,
        "/api/v1/admin/rooms",
        serde_json::json!({ "name": name, "price": price, "status": status }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
