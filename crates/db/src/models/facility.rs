//! Facility and room-facility join models.

use hotel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A facility row from the `facilities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Facility {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a facility.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveFacility {
    pub name: String,
}

/// A `(room_id, facility_id)` pair from `room_facilities`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct RoomFacility {
    pub room_id: DbId,
    pub facility_id: DbId,
}

/// Body of a facility assignment replacement for one room.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignFacilities {
    pub facility_ids: Vec<DbId>,
}
