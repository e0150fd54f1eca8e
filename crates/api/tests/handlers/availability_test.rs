use axum::http::{StatusCode, header::COOKIE};
use chrono::NaiveDate;
use coachbook_core::models::availability::{
    CoachWeek, PublishAvailabilityResponse, SlotBoardResponse, SlotState,
};
use coachbook_core::models::time_slot::TimeSlot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{ALICE, COACH, TestContext, selected};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

async fn publish_default_week(ctx: &TestContext) -> Vec<TimeSlot> {
    let week: CoachWeek = ctx
        .server
        .get("/api/coach/week")
        .add_header(COOKIE, selected(COACH))
        .await
        .json();

    let response = ctx
        .server
        .post("/api/coach/availability")
        .add_header(COOKIE, selected(COACH))
        .json(&json!({ "anchor": "2024-06-03", "slots": week.proposed }))
        .await;
    response.assert_status_ok();
    week.proposed
}

#[tokio::test]
async fn test_coach_week_proposes_business_hours_for_eight_days() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/coach/week")
        .add_header(COOKIE, selected(COACH))
        .await;

    response.assert_status_ok();
    let week: CoachWeek = response.json();
    assert_eq!(week.anchor, monday());
    assert_eq!(week.proposed.len(), 32);
    assert!(week.existing.is_empty());
    assert!(week.can_publish);
}

#[tokio::test]
async fn test_publish_then_week_shows_existing_rows() {
    let ctx = TestContext::new();
    let proposed = publish_default_week(&ctx).await;

    let week: CoachWeek = ctx
        .server
        .get("/api/coach/week")
        .add_header(COOKIE, selected(COACH))
        .add_query_param("anchor", "2024-06-03")
        .await
        .json();

    assert_eq!(week.existing.len(), 32);
    assert_eq!(week.proposed, proposed);
    assert!(!week.can_publish);
    assert_eq!(ctx.store.len().await, 32);
}

#[tokio::test]
async fn test_publish_response_lists_inserted_rows() {
    let ctx = TestContext::new();
    let slot = TimeSlot::new(
        "2024-06-04T10:00:00Z".parse().unwrap(),
        "2024-06-04T12:00:00Z".parse().unwrap(),
    )
    .unwrap();

    let response = ctx
        .server
        .post("/api/coach/availability")
        .add_header(COOKIE, selected(COACH))
        .json(&json!({ "anchor": "2024-06-03", "tz": "UTC", "slots": [slot] }))
        .await;

    response.assert_status_ok();
    let body: PublishAvailabilityResponse = response.json();
    assert_eq!(body.coach_id, COACH);
    assert_eq!(body.published.len(), 1);
    assert_eq!(body.published[0].slot(), slot);
    assert_eq!(body.published[0].student_id, None);
}

#[tokio::test]
async fn test_second_publish_for_same_window_conflicts() {
    let ctx = TestContext::new();
    let proposed = publish_default_week(&ctx).await;

    let response = ctx
        .server
        .post("/api/coach/availability")
        .add_header(COOKIE, selected(COACH))
        .json(&json!({ "anchor": "2024-06-03", "slots": proposed }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["retryable"], json!(false));
    assert_eq!(ctx.store.len().await, 32);
}

#[tokio::test]
async fn test_publish_rejects_empty_selection() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/coach/availability")
        .add_header(COOKIE, selected(COACH))
        .json(&json!({ "anchor": "2024-06-03", "slots": [] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.store.is_empty().await);
}

#[tokio::test]
async fn test_students_cannot_use_coach_endpoints() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/coach/week")
        .add_header(COOKIE, selected(ALICE))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_time_zone_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/coach/week")
        .add_header(COOKIE, selected(COACH))
        .add_query_param("tz", "Mars/Olympus_Mons")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_anchor_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/coach/week")
        .add_header(COOKIE, selected(COACH))
        .add_query_param("anchor", "03/06/2024")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slot_board_marks_published_and_booked_slots() {
    let ctx = TestContext::new();
    publish_default_week(&ctx).await;

    ctx.server
        .post(&format!("/api/coaches/{}/bookings", COACH))
        .add_header(COOKIE, selected(ALICE))
        .json(&json!({ "start": "2024-06-03T12:00:00Z", "end": "2024-06-03T14:00:00Z" }))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .get("/api/coach/board")
        .add_header(COOKIE, selected(COACH))
        .add_query_param("date", "2024-06-03")
        .await;

    response.assert_status_ok();
    let board: SlotBoardResponse = response.json();
    assert_eq!(board.slots.len(), 12);

    let states: Vec<SlotState> = board.slots.iter().map(|entry| entry.state).collect();
    let available = states.iter().filter(|s| **s == SlotState::Available).count();
    let booked = states.iter().filter(|s| **s == SlotState::Booked).count();
    let unselected = states.iter().filter(|s| **s == SlotState::Unselected).count();
    assert_eq!((available, booked, unselected), (3, 1, 8));
    assert_eq!(board.slots[6].state, SlotState::Booked);
}

#[tokio::test]
async fn test_malformed_publish_body_uses_error_shape() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/coach/availability")
        .add_header(COOKIE, selected(COACH))
        .json(&json!({ "anchor": "next monday", "slots": [] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["retryable"], json!(false));
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
    assert!(ctx.store.is_empty().await);
}
