use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Slot is no longer available, please pick another time")]
    SlotNoLongerAvailable,

    #[error("Availability already published for the window starting {0}")]
    WindowAlreadyPublished(NaiveDate),

    #[error("Appointment store unavailable: {0}")]
    StoreUnavailable(#[from] eyre::Report),
}

impl BookingError {
    /// Only transport failures are worth retrying; a lost race or a rejected
    /// input gives the same answer the second time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::StoreUnavailable(_))
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(report) => BookingError::StoreUnavailable(report),
            StoreError::Conflict(message) => BookingError::InvalidInput(message),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
