use std::sync::Arc;

use axum::http::StatusCode;
use chrono::NaiveDate;
use coachbook_api::middleware::error_handling::map_error;
use coachbook_core::errors::BookingError;
use coachbook_core::store::StoreError;
use coachbook_core::store::memory::InMemoryDirectory;
use coachbook_db::mock::repositories::{MockAppointmentRepo, MockUserRepo};
use rstest::rstest;
use serde_json::{Value, json};

use crate::test_utils::{COACH, server_with, users};

#[rstest]
#[case::not_found(BookingError::NotFound("coach 9".into()), StatusCode::NOT_FOUND)]
#[case::invalid(BookingError::InvalidInput("bad date".into()), StatusCode::BAD_REQUEST)]
#[case::lost_race(BookingError::SlotNoLongerAvailable, StatusCode::CONFLICT)]
#[case::republish(
    BookingError::WindowAlreadyPublished(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
    StatusCode::CONFLICT
)]
#[case::outage(
    BookingError::StoreUnavailable(eyre::eyre!("connection refused")),
    StatusCode::SERVICE_UNAVAILABLE
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_store_outage_is_retryable_503() {
    let mut store = MockAppointmentRepo::new();
    store
        .expect_query()
        .returning(|_| Err(StoreError::Unavailable(eyre::eyre!("connection refused"))));

    let server = server_with(
        Arc::new(store),
        Arc::new(InMemoryDirectory::with_users(users())),
    );

    let response = server
        .get(&format!("/api/coaches/{}/availability", COACH))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["retryable"], json!(true));
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Appointment store unavailable")
    );
}

#[tokio::test]
async fn test_directory_outage_is_retryable_503() {
    let mut directory = MockUserRepo::new();
    directory
        .expect_list_users()
        .returning(|| Err(StoreError::Unavailable(eyre::eyre!("pool timed out"))));

    let server = server_with(Arc::new(MockAppointmentRepo::new()), Arc::new(directory));

    let response = server.get("/api/users").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["retryable"], json!(true));
}
