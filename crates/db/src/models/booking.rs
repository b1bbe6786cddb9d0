//! Booking entity model and DTOs.

use hotel_core::types::{DbId, StayDate, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub room_id: DbId,
    pub guest_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub check_in: StayDate,
    pub check_out: StayDate,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A booking joined with the name and price of its room (admin listing).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingWithRoom {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub room_name: String,
    pub room_price: i32,
}

/// The part of a conflicting booking shown to a guest.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct BookingConflict {
    pub id: DbId,
    pub guest_name: String,
    pub check_in: StayDate,
    pub check_out: StayDate,
}

/// DTO for inserting a booking. Status is always `pending` on insert.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub room_id: DbId,
    pub guest_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub check_in: StayDate,
    pub check_out: StayDate,
}

/// Body of an administrator status change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookingStatus {
    pub status: hotel_core::booking::BookingStatus,
}
