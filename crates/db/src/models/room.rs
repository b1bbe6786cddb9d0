//! Room entity model and DTOs.

use hotel_core::room::{RoomAttributes, RoomStatus};
use hotel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::models::facility::Facility;

/// A room row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: i32,
    pub image_url: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RoomAttributes for Room {
    fn status_name(&self) -> &str {
        &self.status
    }

    fn price(&self) -> i32 {
        self.price
    }
}

/// A room together with its assigned facilities (public detail view).
#[derive(Debug, Clone, Serialize)]
pub struct RoomWithFacilities {
    #[serde(flatten)]
    pub room: Room,
    pub facilities: Vec<Facility>,
}

/// DTO for creating a new room.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoom {
    pub name: String,
    pub description: Option<String>,
    pub price: i32,
    /// Defaults to `available` if omitted.
    pub status: Option<RoomStatus>,
}

/// DTO for updating an existing room. All fields are optional.
///
/// `description` distinguishes an absent key (`None`, keep) from an explicit
/// `null` (`Some(None)`, clear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRoom {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub price: Option<i32>,
    pub status: Option<RoomStatus>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
