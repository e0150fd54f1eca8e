use chrono::{Duration, NaiveDate, TimeZone, Utc};
use coachbook_core::models::{
    appointment::{Appointment, AppointmentStatus},
    availability::{PublishAvailabilityRequest, SlotState},
    booking::ReserveSlotRequest,
    time_slot::TimeSlot,
    user::{User, UserRole},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};

fn sample_appointment(student_id: Option<i64>) -> Appointment {
    let start = Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap();
    Appointment {
        id: 1,
        coach_id: 10,
        student_id,
        start_time: start,
        end_time: start + Duration::hours(2),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
    }
}

#[test]
fn test_time_slot_rejects_empty_or_inverted_ranges() {
    let start = Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap();

    assert!(TimeSlot::new(start, start).is_err());
    assert!(TimeSlot::new(start, start - Duration::hours(1)).is_err());

    let slot = TimeSlot::new(start, start + Duration::hours(2)).unwrap();
    assert_eq!(slot.duration(), Duration::hours(2));
}

#[test]
fn test_time_slot_equality_is_by_bounds() {
    let start = Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap();
    let a = TimeSlot::new(start, start + Duration::hours(2)).unwrap();
    let b = TimeSlot::new(start, start + Duration::hours(2)).unwrap();
    let c = TimeSlot::new(start, start + Duration::hours(3)).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[rstest]
#[case(None, AppointmentStatus::Open)]
#[case(Some(22), AppointmentStatus::Booked)]
fn test_appointment_status(#[case] student_id: Option<i64>, #[case] expected: AppointmentStatus) {
    assert_eq!(sample_appointment(student_id).status(), expected);
}

#[test]
fn test_appointment_serializes_utc_instants() {
    let value = to_value(sample_appointment(None)).expect("Failed to serialize appointment");

    assert_eq!(value["start_time"], json!("2024-06-03T10:00:00Z"));
    assert_eq!(value["end_time"], json!("2024-06-03T12:00:00Z"));
    assert_eq!(value["student_id"], json!(null));
}

#[rstest]
#[case("coach", UserRole::Coach)]
#[case("student", UserRole::Student)]
fn test_user_role_parsing(#[case] raw: &str, #[case] expected: UserRole) {
    assert_eq!(raw.parse::<UserRole>().unwrap(), expected);
    assert_eq!(expected.to_string(), raw);
}

#[test]
fn test_user_role_rejects_unknown() {
    assert!("admin".parse::<UserRole>().is_err());
}

#[test]
fn test_user_deserializes_lowercase_role() {
    let user: User = from_str(r#"{"id": 3, "email": "coach@example.com", "role": "coach"}"#)
        .expect("Failed to deserialize user");
    assert_eq!(user.role, UserRole::Coach);
}

#[test]
fn test_publish_request_from_client_payload() {
    let payload = r#"{
        "anchor": "2024-06-03",
        "tz": "Europe/Berlin",
        "slots": [
            {"start": "2024-06-03T08:00:00Z", "end": "2024-06-03T10:00:00Z"},
            {"start": "2024-06-03T10:00:00.000Z", "end": "2024-06-03T12:00:00.000Z"}
        ]
    }"#;
    let request: PublishAvailabilityRequest =
        from_str(payload).expect("Failed to deserialize publish request");

    assert_eq!(request.anchor, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    assert_eq!(request.tz.as_deref(), Some("Europe/Berlin"));
    assert_eq!(request.slots.len(), 2);
    assert_eq!(
        request.slots[1].start,
        Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap()
    );
}

#[test]
fn test_reserve_request_accepts_offsets() {
    let request: ReserveSlotRequest = from_str(
        r#"{"start": "2024-06-03T12:00:00+02:00", "end": "2024-06-03T14:00:00+02:00"}"#,
    )
    .expect("Failed to deserialize reserve request");

    assert_eq!(
        request.start,
        Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap()
    );
}

#[test]
fn test_slot_state_wire_names() {
    assert_eq!(to_value(SlotState::Unselected).unwrap(), json!("unselected"));
    assert_eq!(to_value(SlotState::Available).unwrap(), json!("available"));
    assert_eq!(to_value(SlotState::Booked).unwrap(), json!("booked"));
}
