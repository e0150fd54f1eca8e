//! # Request Handlers
//!
//! Handlers parse the HTTP surface (query strings, JSON bodies and the
//! selection cookie) into explicit arguments and call the scheduling service.
//! They never touch storage directly.

/// Coach availability: week view, publish, slot board
pub mod availability;
/// Student booking and both agendas
pub mod booking;
/// User listing and selection
pub mod users;

use chrono::NaiveDate;
use chrono_tz::Tz;
use coachbook_core::errors::BookingResult;
use coachbook_core::window::{parse_date, parse_time_zone};
use serde::Deserialize;

use crate::ApiState;

/// Query parameters shared by the windowed endpoints
///
/// # Fields
///
/// * `anchor` - First day of the window as `YYYY-MM-DD` (default: today)
/// * `tz` - IANA zone name (default: the configured zone)
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub anchor: Option<String>,
    pub tz: Option<String>,
}

/// Query parameters for the single-day slot board
#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
    pub tz: Option<String>,
}

pub(crate) fn resolve_zone(state: &ApiState, tz: Option<&str>) -> BookingResult<Tz> {
    match tz.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => parse_time_zone(name),
        None => Ok(state.default_timezone),
    }
}

/// A missing date means today in `tz`.
pub(crate) fn resolve_date(state: &ApiState, date: Option<&str>, tz: Tz) -> BookingResult<NaiveDate> {
    match date.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_date(raw),
        None => Ok(state.scheduling.today(tz)),
    }
}
