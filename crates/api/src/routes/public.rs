//! Guest-facing routes. No authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{booking, facility, room};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(room::list_public))
        .route("/rooms/{id}", get(room::get_by_id))
        .route("/rooms/{id}/facilities", get(facility::list_for_room))
        .route("/rooms/{id}/availability", get(booking::availability))
        .route("/rooms/{id}/bookings", post(booking::submit))
        .route("/facilities", get(facility::list))
}
