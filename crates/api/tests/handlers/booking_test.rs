use axum::http::{StatusCode, header::COOKIE};
use coachbook_core::models::availability::{AvailableSlotsResponse, CoachWeek};
use coachbook_core::models::booking::{AgendaResponse, ReserveSlotResponse};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{ALICE, BOB, COACH, SECOND_COACH, TestContext, selected};

async fn publish_default_week(ctx: &TestContext) {
    let week: CoachWeek = ctx
        .server
        .get("/api/coach/week")
        .add_header(COOKIE, selected(COACH))
        .await
        .json();

    ctx.server
        .post("/api/coach/availability")
        .add_header(COOKIE, selected(COACH))
        .json(&json!({ "anchor": "2024-06-03", "slots": week.proposed }))
        .await
        .assert_status_ok();
}

async fn available(ctx: &TestContext) -> AvailableSlotsResponse {
    let response = ctx
        .server
        .get(&format!("/api/coaches/{}/availability", COACH))
        .add_query_param("anchor", "2024-06-03")
        .await;
    response.assert_status_ok();
    response.json()
}

fn ten_am_monday() -> Value {
    json!({ "start": "2024-06-03T10:00:00Z", "end": "2024-06-03T12:00:00Z" })
}

#[tokio::test]
async fn test_student_sees_seven_days_of_open_slots() {
    let ctx = TestContext::new();
    publish_default_week(&ctx).await;

    let body = available(&ctx).await;

    assert_eq!(body.coach_id, COACH);
    assert_eq!(body.slots.len(), 28);
    assert!(body.slots.windows(2).all(|pair| pair[0].start < pair[1].start));
}

#[tokio::test]
async fn test_second_student_loses_the_slot() {
    let ctx = TestContext::new();
    publish_default_week(&ctx).await;

    let first = ctx
        .server
        .post(&format!("/api/coaches/{}/bookings", COACH))
        .add_header(COOKIE, selected(ALICE))
        .json(&ten_am_monday())
        .await;
    first.assert_status_ok();
    let booked: ReserveSlotResponse = first.json();
    assert_eq!(booked.appointment.student_id, Some(ALICE));

    let second = ctx
        .server
        .post(&format!("/api/coaches/{}/bookings", COACH))
        .add_header(COOKIE, selected(BOB))
        .json(&ten_am_monday())
        .await;
    second.assert_status(StatusCode::CONFLICT);
    let error: Value = second.json();
    assert_eq!(error["retryable"], json!(false));

    assert_eq!(available(&ctx).await.slots.len(), 27);
}

#[tokio::test]
async fn test_booking_unpublished_slot_conflicts() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post(&format!("/api/coaches/{}/bookings", COACH))
        .add_header(COOKIE, selected(ALICE))
        .json(&ten_am_monday())
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_booking_requires_a_selected_student() {
    let ctx = TestContext::new();
    publish_default_week(&ctx).await;

    let anonymous = ctx
        .server
        .post(&format!("/api/coaches/{}/bookings", COACH))
        .json(&ten_am_monday())
        .await;
    anonymous.assert_status(StatusCode::BAD_REQUEST);

    let as_coach = ctx
        .server
        .post(&format!("/api/coaches/{}/bookings", COACH))
        .add_header(COOKIE, selected(SECOND_COACH))
        .json(&ten_am_monday())
        .await;
    as_coach.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inverted_slot_is_rejected() {
    let ctx = TestContext::new();
    publish_default_week(&ctx).await;

    let response = ctx
        .server
        .post(&format!("/api/coaches/{}/bookings", COACH))
        .add_header(COOKIE, selected(ALICE))
        .json(&json!({ "start": "2024-06-03T12:00:00Z", "end": "2024-06-03T10:00:00Z" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_availability_of_a_student_id_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/coaches/{}/availability", ALICE))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_agendas_name_the_counterpart() {
    let ctx = TestContext::new();
    publish_default_week(&ctx).await;

    ctx.server
        .post(&format!("/api/coaches/{}/bookings", COACH))
        .add_header(COOKIE, selected(ALICE))
        .json(&ten_am_monday())
        .await
        .assert_status_ok();

    let coach_agenda: AgendaResponse = ctx
        .server
        .get("/api/coach/appointments")
        .add_header(COOKIE, selected(COACH))
        .await
        .json();
    assert_eq!(coach_agenda.appointments.len(), 1);
    assert_eq!(coach_agenda.appointments[0].counterpart_id, ALICE);
    assert_eq!(
        coach_agenda.appointments[0].counterpart_email,
        "alice@example.com"
    );

    let student_agenda: AgendaResponse = ctx
        .server
        .get("/api/student/appointments")
        .add_header(COOKIE, selected(ALICE))
        .await
        .json();
    assert_eq!(student_agenda.appointments.len(), 1);
    assert_eq!(
        student_agenda.appointments[0].counterpart_email,
        "coach@example.com"
    );

    let bob_agenda: AgendaResponse = ctx
        .server
        .get("/api/student/appointments")
        .add_header(COOKIE, selected(BOB))
        .await
        .json();
    assert!(bob_agenda.appointments.is_empty());
}

#[tokio::test]
async fn test_anchor_beyond_calendar_range_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/coaches/{}/availability", COACH))
        .add_query_param("anchor", "+262142-12-30")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["retryable"], json!(false));
}

#[tokio::test]
async fn test_malformed_booking_requests_use_error_shape() {
    let ctx = TestContext::new();

    let bad_body = ctx
        .server
        .post(&format!("/api/coaches/{}/bookings", COACH))
        .add_header(COOKIE, selected(ALICE))
        .json(&json!({ "start": "monday at ten" }))
        .await;
    bad_body.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = bad_body.json();
    assert_eq!(body["retryable"], json!(false));

    let bad_path = ctx.server.get("/api/coaches/abc/availability").await;
    bad_path.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = bad_path.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
}
