//! # Coachbook core
//!
//! Domain logic for coach availability and student bookings: slot
//! generation, window math, the publish/query/reserve operations and the
//! store contracts they run against.

pub mod availability;
pub mod booking;
pub mod clock;
pub mod errors;
pub mod models;
pub mod service;
pub mod slots;
pub mod store;
pub mod window;
