pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                              login (public)
/// /auth/refresh                            refresh (public)
/// /auth/logout                             logout (requires auth)
/// /auth/me                                 current admin (requires auth)
///
/// /rooms                                   filtered listing + slider max
/// /rooms/{id}                              room detail with facilities
/// /rooms/{id}/facilities                   facilities of a room
/// /rooms/{id}/availability                 conflict check
/// /rooms/{id}/bookings                     submit booking (POST)
/// /facilities                              all facilities
///
/// /admin/rooms                             list, create
/// /admin/rooms/{id}                        update, delete
/// /admin/rooms/{id}/image                  upload image (POST, multipart)
/// /admin/rooms/{id}/facilities             replace assignments (PUT)
/// /admin/facilities                        create
/// /admin/facilities/{id}                   rename, delete
/// /admin/room-facilities                   all assignments
/// /admin/bookings                          list (?status=)
/// /admin/bookings/{id}/status              change status (PATCH)
/// /admin/dashboard/stats                   counters
/// ```
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router(max_upload_bytes))
        .merge(public::router())
}
