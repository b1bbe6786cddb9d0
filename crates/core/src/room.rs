//! Room status, field validation, and the public listing filter.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Floor for the price slider upper bound shown to guests.
pub const DEFAULT_MAX_PRICE: i32 = 1000;

/// Administrator-set availability flag. Independent of booking data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Booked,
    Maintenance,
}

impl RoomStatus {
    /// Parse from the database `status` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "available" => Ok(Self::Available),
            "booked" => Ok(Self::Booked),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(CoreError::Validation(format!(
                "Unknown room status '{other}'. Must be one of: available, booked, maintenance"
            ))),
        }
    }

    /// Database name value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Booked => "booked",
            Self::Maintenance => "maintenance",
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Trim a room name and require it to be non-empty.
pub fn normalize_room_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Room name is required".into()));
    }
    Ok(trimmed.to_string())
}

/// A blank description is stored as no description.
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Prices are whole currency units and never negative.
pub fn validate_price(price: i32) -> Result<(), CoreError> {
    if price < 0 {
        return Err(CoreError::Validation(format!(
            "Price must not be negative, got {price}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Listing filter
// ---------------------------------------------------------------------------

/// The attributes the listing filter reads from a room row.
pub trait RoomAttributes {
    fn status_name(&self) -> &str;
    fn price(&self) -> i32;
}

/// Filter applied to the public room listing.
///
/// `status: None` means every status. Price bounds are inclusive and each is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub status: Option<RoomStatus>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
}

impl RoomFilter {
    /// Build a filter from raw query values. A status of `"all"` (or none)
    /// disables status filtering.
    pub fn from_query(
        status: Option<&str>,
        min_price: Option<i32>,
        max_price: Option<i32>,
    ) -> Result<Self, CoreError> {
        let status = match status.map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(name) => Some(RoomStatus::from_name(name)?),
        };
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(CoreError::Validation(format!(
                    "min_price ({min}) must not exceed max_price ({max})"
                )));
            }
        }
        Ok(Self {
            status,
            min_price,
            max_price,
        })
    }

    pub fn matches<R: RoomAttributes>(&self, room: &R) -> bool {
        if let Some(status) = self.status {
            if room.status_name() != status.as_str() {
                return false;
            }
        }
        let price = room.price();
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }

    /// Keep the rooms that satisfy every predicate, in their original order.
    pub fn apply<R: RoomAttributes>(&self, rooms: Vec<R>) -> Vec<R> {
        rooms.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Upper bound for the guest price slider: the highest room price, but never
/// below [`DEFAULT_MAX_PRICE`].
pub fn slider_max_price<R: RoomAttributes>(rooms: &[R]) -> i32 {
    rooms
        .iter()
        .map(RoomAttributes::price)
        .fold(DEFAULT_MAX_PRICE, i32::max)
}
