//! Admin dashboard counters.

use serde::Serialize;
use sqlx::FromRow;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct DashboardStats {
    pub total_rooms: i64,
    pub available_rooms: i64,
    pub total_bookings: i64,
    pub pending_bookings: i64,
}
