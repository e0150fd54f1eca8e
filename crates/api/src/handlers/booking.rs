//! # Booking Handlers
//!
//! Student-facing availability and reservation, plus the upcoming agendas for
//! both roles.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use coachbook_core::models::{
    availability::AvailableSlotsResponse,
    booking::{AgendaResponse, ReserveSlotRequest, ReserveSlotResponse},
    time_slot::TimeSlot,
    user::{UserId, UserRole},
};

use super::{WindowQuery, resolve_date, resolve_zone};
use crate::{ApiState, middleware::error_handling::AppError, middleware::identity::SelectedUser};

/// Lists a coach's open, future slots for the week starting at the anchor
///
/// No selection is needed to browse.
///
/// # Endpoint
///
/// ```text
/// GET /api/coaches/:coach_id/availability?anchor=2024-06-03&tz=UTC
/// ```
#[axum::debug_handler]
pub async fn available_slots(
    State(state): State<Arc<ApiState>>,
    coach_id: Result<Path<UserId>, PathRejection>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let Path(coach_id) = coach_id?;
    let coach = state
        .scheduling
        .require_role(coach_id, UserRole::Coach)
        .await?;
    let tz = resolve_zone(&state, query.tz.as_deref())?;
    let anchor = resolve_date(&state, query.anchor.as_deref(), tz)?;

    let slots = state.scheduling.query_available(coach.id, anchor, tz).await?;

    Ok(Json(AvailableSlotsResponse {
        coach_id: coach.id,
        anchor,
        slots,
    }))
}

/// Reserves one of the coach's open slots for the selected student
///
/// # Endpoint
///
/// ```text
/// POST /api/coaches/:coach_id/bookings
/// { "start": "2024-06-03T10:00:00Z", "end": "2024-06-03T12:00:00Z" }
/// ```
///
/// # Errors
///
/// * `BookingError::SlotNoLongerAvailable` - Someone else got there first
/// * `BookingError::InvalidInput` - Missing cookie or inverted slot
/// * `BookingError::NotFound` - Unknown coach, or the selected user is not a student
/// * `BookingError::StoreUnavailable` - Store failure, safe to retry
#[axum::debug_handler]
pub async fn reserve_slot(
    State(state): State<Arc<ApiState>>,
    SelectedUser(user_id): SelectedUser,
    coach_id: Result<Path<UserId>, PathRejection>,
    payload: Result<Json<ReserveSlotRequest>, JsonRejection>,
) -> Result<Json<ReserveSlotResponse>, AppError> {
    let Path(coach_id) = coach_id?;
    let Json(request) = payload?;
    let student = state
        .scheduling
        .require_role(user_id, UserRole::Student)
        .await?;
    let coach = state
        .scheduling
        .require_role(coach_id, UserRole::Coach)
        .await?;
    let slot = TimeSlot::new(request.start, request.end)?;

    let appointment = state.scheduling.reserve(coach.id, student.id, slot).await?;
    Ok(Json(ReserveSlotResponse { appointment }))
}

/// Upcoming booked appointments of the selected coach, with student emails
///
/// # Endpoint
///
/// ```text
/// GET /api/coach/appointments
/// ```
#[axum::debug_handler]
pub async fn coach_appointments(
    State(state): State<Arc<ApiState>>,
    SelectedUser(user_id): SelectedUser,
) -> Result<Json<AgendaResponse>, AppError> {
    let coach = state
        .scheduling
        .require_role(user_id, UserRole::Coach)
        .await?;
    let appointments = state.scheduling.upcoming_for_coach(coach.id).await?;
    Ok(Json(AgendaResponse { appointments }))
}

/// Upcoming bookings of the selected student, with coach emails
///
/// # Endpoint
///
/// ```text
/// GET /api/student/appointments
/// ```
#[axum::debug_handler]
pub async fn student_appointments(
    State(state): State<Arc<ApiState>>,
    SelectedUser(user_id): SelectedUser,
) -> Result<Json<AgendaResponse>, AppError> {
    let student = state
        .scheduling
        .require_role(user_id, UserRole::Student)
        .await?;
    let appointments = state.scheduling.upcoming_for_student(student.id).await?;
    Ok(Json(AgendaResponse { appointments }))
}
