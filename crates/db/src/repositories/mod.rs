//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod dashboard_repo;
pub mod facility_repo;
pub mod room_facility_repo;
pub mod room_repo;
pub mod session_repo;
pub mod user_repo;

pub use booking_repo::{BookingInsert, BookingRepo, StatusChange};
pub use dashboard_repo::DashboardRepo;
pub use facility_repo::FacilityRepo;
pub use room_facility_repo::RoomFacilityRepo;
pub use room_repo::RoomRepo;
pub use session_repo::{Rotation, SessionRepo};
pub use user_repo::UserRepo;
