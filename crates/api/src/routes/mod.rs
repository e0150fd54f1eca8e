/// Coach availability routes
pub mod availability;
/// Student booking and agenda routes
pub mod booking;
/// Health and version routes
pub mod health;
/// User listing and selection routes
pub mod users;
