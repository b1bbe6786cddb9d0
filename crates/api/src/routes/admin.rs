//! Back office routes mounted at `/admin`. Every handler requires an admin.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{booking, dashboard, facility, room};
use crate::state::AppState;

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/rooms", get(room::list).post(room::create))
        .route("/rooms/{id}", put(room::update).delete(room::delete))
        .route(
            "/rooms/{id}/image",
            post(room::upload_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/rooms/{id}/facilities", put(facility::assign))
        .route("/facilities", post(facility::create))
        .route(
            "/facilities/{id}",
            put(facility::update).delete(facility::delete),
        )
        .route("/room-facilities", get(facility::list_assignments))
        .route("/bookings", get(booking::list))
        .route("/bookings/{id}/status", patch(booking::update_status))
        .route("/dashboard/stats", get(dashboard::stats))
}
