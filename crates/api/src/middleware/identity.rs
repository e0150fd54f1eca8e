//! # Selected-User Identity
//!
//! The only notion of "who is acting" is a cookie holding a user id. It is
//! not signed and proves nothing; handlers read it through [`SelectedUser`]
//! and pass the id explicitly into the scheduling service.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::COOKIE, request::Parts},
};
use coachbook_core::{errors::BookingError, models::user::UserId};

use crate::config::CookieSettings;
use crate::middleware::error_handling::AppError;

pub const SELECTED_USER_COOKIE: &str = "selectedUserId";

/// The user id carried by the selection cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for SelectedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = cookie_value(&parts.headers, SELECTED_USER_COOKIE).ok_or_else(|| {
            AppError(BookingError::InvalidInput("no user selected".to_string()))
        })?;

        raw.parse::<UserId>().map(SelectedUser).map_err(|_| {
            AppError(BookingError::InvalidInput(format!(
                "invalid selected user id {:?}",
                raw
            )))
        })
    }
}

/// Finds a non-empty cookie called `name` across all `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
        .find(|value| !value.is_empty())
}

/// `Set-Cookie` value selecting `user_id`.
pub fn selection_cookie(user_id: UserId, settings: &CookieSettings) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        SELECTED_USER_COOKIE, user_id, settings.max_age_secs
    );
    if settings.secure {
        cookie.push_str("; Secure");
    }
    cookie
}
