pub mod appointment;
pub mod availability;
pub mod booking;
pub mod time_slot;
pub mod user;
