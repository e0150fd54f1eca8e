//! # User Handlers
//!
//! Listing users and choosing which one the browser acts as. Selection only
//! checks that the user exists; it is not authentication.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
};
use coachbook_core::models::user::{SelectUserRequest, SelectUserResponse, User, UserId};
use tracing::info;

use crate::{
    ApiState,
    middleware::error_handling::AppError,
    middleware::identity::{SelectedUser, selection_cookie},
};

/// Lists every user
///
/// # Endpoint
///
/// ```text
/// GET /api/users
/// ```
#[axum::debug_handler]
pub async fn list_users(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.scheduling.list_users().await?))
}

/// Lists users with the coach role
///
/// # Endpoint
///
/// ```text
/// GET /api/coaches
/// ```
#[axum::debug_handler]
pub async fn list_coaches(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.scheduling.list_coaches().await?))
}

/// Retrieves one user by id
///
/// # Endpoint
///
/// ```text
/// GET /api/users/:id
/// ```
///
/// # Errors
///
/// * `BookingError::NotFound` - No user has this id
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.scheduling.get_user(id).await?))
}

/// Selects the user this browser acts as and sets the selection cookie
///
/// # Endpoint
///
/// ```text
/// POST /api/session
/// { "user_id": 1 }
/// ```
#[axum::debug_handler]
pub async fn select_user(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<SelectUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let user = state.scheduling.get_user(request.user_id).await?;
    info!("Selected user {} ({})", user.id, user.role);

    let cookie = selection_cookie(user.id, &state.cookie);
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(SelectUserResponse { user }),
    ))
}

/// Returns the currently selected user
///
/// # Endpoint
///
/// ```text
/// GET /api/session
/// ```
///
/// # Errors
///
/// * `BookingError::InvalidInput` - No selection cookie
/// * `BookingError::NotFound` - The cookie names no user
#[axum::debug_handler]
pub async fn current_user(
    State(state): State<Arc<ApiState>>,
    SelectedUser(user_id): SelectedUser,
) -> Result<Json<SelectUserResponse>, AppError> {
    let user = state.scheduling.get_user(user_id).await?;
    Ok(Json(SelectUserResponse { user }))
}
