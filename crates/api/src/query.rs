//! Query string types shared by handler modules.

use hotel_core::types::StayDate;
use serde::Deserialize;

/// `GET /rooms?status=&min_price=&max_price=`
#[derive(Debug, Default, Deserialize)]
pub struct RoomListParams {
    pub status: Option<String>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
}

/// `GET /admin/bookings?status=`. `all` or absent lists every booking.
#[derive(Debug, Default, Deserialize)]
pub struct BookingListParams {
    pub status: Option<String>,
}

/// `GET /rooms/{id}/availability?check_in=&check_out=`
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub check_in: StayDate,
    pub check_out: StayDate,
}
