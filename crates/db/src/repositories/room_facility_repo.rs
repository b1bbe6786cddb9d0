//! Repository for the `room_facilities` join table.

use hotel_core::types::DbId;
use sqlx::PgPool;

use crate::models::facility::{Facility, RoomFacility};

/// Assignment of facilities to rooms.
pub struct RoomFacilityRepo;

impl RoomFacilityRepo {
    /// Every `(room_id, facility_id)` pair.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<RoomFacility>, sqlx::Error> {
        sqlx::query_as::<_, RoomFacility>(
            "SELECT room_id, facility_id FROM room_facilities ORDER BY room_id, facility_id",
        )
        .fetch_all(pool)
        .await
    }

    /// Facilities assigned to one room, ordered by name.
    pub async fn list_for_room(pool: &PgPool, room_id: DbId) -> Result<Vec<Facility>, sqlx::Error> {
        sqlx::query_as::<_, Facility>(
            "SELECT f.id, f.name, f.created_at, f.updated_at
             FROM room_facilities rf
             JOIN facilities f ON f.id = rf.facility_id
             WHERE rf.room_id = $1
             ORDER BY f.name",
        )
        .bind(room_id)
        .fetch_all(pool)
        .await
    }

    /// Replace the facility set of a room atomically.
    ///
    /// `facility_ids` must already be free of duplicates. An unknown id
    /// fails the whole replacement with a foreign-key violation.
    pub async fn replace_for_room(
        pool: &PgPool,
        room_id: DbId,
        facility_ids: &[DbId],
    ) -> Result<Vec<Facility>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM room_facilities WHERE room_id = $1")
            .bind(room_id)
            .execute(&mut *tx)
            .await?;

        if !facility_ids.is_empty() {
            sqlx::query(
                "INSERT INTO room_facilities (room_id, facility_id)
                 SELECT $1, UNNEST($2::BIGINT[])",
            )
            .bind(room_id)
            .bind(facility_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(room_id, count = facility_ids.len(), "Replaced room facilities");
        Self::list_for_room(pool, room_id).await
    }
}
