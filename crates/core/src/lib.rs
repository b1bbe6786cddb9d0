//! Domain types, validation rules, and pure booking logic for the hotel
//! booking service.
//!
//! Nothing in this crate touches the database or the network; the `db` and
//! `api` crates build on these definitions.

pub mod booking;
pub mod clock;
pub mod error;
pub mod facility;
pub mod media;
pub mod roles;
pub mod room;
pub mod types;
