/// Domain error to HTTP response mapping
pub mod error_handling;
/// Selected-user cookie extraction
pub mod identity;
