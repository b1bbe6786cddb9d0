//! Aggregate counters for the admin dashboard.

use hotel_core::booking::BookingStatus;
use hotel_core::room::RoomStatus;
use sqlx::PgPool;

use crate::models::dashboard::DashboardStats;

pub struct DashboardRepo;

impl DashboardRepo {
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM rooms) AS total_rooms,
                (SELECT COUNT(*) FROM rooms WHERE status = $1) AS available_rooms,
                (SELECT COUNT(*) FROM bookings) AS total_bookings,
                (SELECT COUNT(*) FROM bookings WHERE status = $2) AS pending_bookings",
        )
        .bind(RoomStatus::Available.as_str())
        .bind(BookingStatus::Pending.as_str())
        .fetch_one(pool)
        .await
    }
}
