//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every
//! endpoint fails the same way. The body carries a `retryable` flag: only a
//! store outage is worth retrying, a lost booking race or a rejected input is
//! not.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coachbook_core::errors::BookingError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use coachbook_api::middleware::error_handling::AppError;
/// use coachbook_core::errors::BookingError;
///
/// async fn handler(user_id: Option<i64>) -> Result<Json<i64>, AppError> {
///     let user_id = user_id
///         .ok_or_else(|| AppError(BookingError::InvalidInput("no user selected".to_string())))?;
///     Ok(Json(user_id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BookingError::SlotNoLongerAvailable => StatusCode::CONFLICT,
            BookingError::WindowAlreadyPublished(_) => StatusCode::CONFLICT,
            BookingError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {:#}", self.0);
        }

        let body = Json(json!({
            "error": self.0.to_string(),
            "retryable": self.0.is_retryable(),
        }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Malformed JSON bodies get the same error shape as any other bad input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(BookingError::InvalidInput(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(BookingError::InvalidInput(rejection.body_text()))
    }
}

/// Maps a BookingError straight to a response.
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
