//! # Availability Handlers
//!
//! Coach-facing endpoints. Each one requires the selected user to be a coach
//! and acts on that coach's own appointments.
//!
//! ## Publishing
//!
//! A coach sees the proposed business-hours slots for the eight days starting
//! at the anchor, unticks what they cannot do, and publishes the rest in one
//! request. Publishing is refused once the window holds any appointment, so a
//! second submission for the same anchor fails with `409 Conflict` instead of
//! duplicating rows.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use coachbook_core::models::{
    availability::{CoachWeek, PublishAvailabilityRequest, PublishAvailabilityResponse, SlotBoardResponse},
    user::UserRole,
};
use tracing::debug;

use super::{DayQuery, WindowQuery, resolve_date, resolve_zone};
use crate::{ApiState, middleware::error_handling::AppError, middleware::identity::SelectedUser};

/// Returns the selected coach's week: existing rows, proposed slots and
/// whether publishing is still possible
///
/// # Endpoint
///
/// ```text
/// GET /api/coach/week?anchor=2024-06-03&tz=Europe/Berlin
/// ```
///
/// # Errors
///
/// * `BookingError::InvalidInput` - Missing cookie, bad date or unknown zone
/// * `BookingError::NotFound` - The selected user is not a coach
/// * `BookingError::StoreUnavailable` - Store failure
#[axum::debug_handler]
pub async fn coach_week(
    State(state): State<Arc<ApiState>>,
    SelectedUser(user_id): SelectedUser,
    Query(query): Query<WindowQuery>,
) -> Result<Json<CoachWeek>, AppError> {
    let coach = state
        .scheduling
        .require_role(user_id, UserRole::Coach)
        .await?;
    let tz = resolve_zone(&state, query.tz.as_deref())?;
    let anchor = resolve_date(&state, query.anchor.as_deref(), tz)?;

    let week = state.scheduling.coach_week(coach.id, anchor, tz).await?;
    Ok(Json(week))
}

/// Publishes the submitted slots as open appointments for the selected coach
///
/// # Endpoint
///
/// ```text
/// POST /api/coach/availability
/// { "anchor": "2024-06-03", "tz": "UTC", "slots": [{ "start": "...", "end": "..." }] }
/// ```
///
/// # Errors
///
/// * `BookingError::InvalidInput` - Empty, duplicated or out-of-window slots
/// * `BookingError::WindowAlreadyPublished` - The window already has rows
/// * `BookingError::NotFound` - The selected user is not a coach
/// * `BookingError::StoreUnavailable` - Store failure
#[axum::debug_handler]
pub async fn publish_availability(
    State(state): State<Arc<ApiState>>,
    SelectedUser(user_id): SelectedUser,
    payload: Result<Json<PublishAvailabilityRequest>, JsonRejection>,
) -> Result<Json<PublishAvailabilityResponse>, AppError> {
    let Json(request) = payload?;
    let coach = state
        .scheduling
        .require_role(user_id, UserRole::Coach)
        .await?;
    let tz = resolve_zone(&state, request.tz.as_deref())?;

    let published = state
        .scheduling
        .publish(coach.id, request.anchor, tz, request.slots)
        .await?;

    Ok(Json(PublishAvailabilityResponse {
        coach_id: coach.id,
        anchor: request.anchor,
        published,
    }))
}

/// Returns the twelve slots of one day, marked unselected, available or booked
///
/// # Endpoint
///
/// ```text
/// GET /api/coach/board?date=2024-06-03&tz=UTC
/// ```
#[axum::debug_handler]
pub async fn slot_board(
    State(state): State<Arc<ApiState>>,
    SelectedUser(user_id): SelectedUser,
    Query(query): Query<DayQuery>,
) -> Result<Json<SlotBoardResponse>, AppError> {
    let coach = state
        .scheduling
        .require_role(user_id, UserRole::Coach)
        .await?;
    let tz = resolve_zone(&state, query.tz.as_deref())?;
    let date = resolve_date(&state, query.date.as_deref(), tz)?;

    let slots = state.scheduling.slot_board(coach.id, date, tz).await?;
    debug!("Built slot board for coach {} on {}", coach.id, date);

    Ok(Json(SlotBoardResponse {
        coach_id: coach.id,
        date,
        slots,
    }))
}
