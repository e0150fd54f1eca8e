//! Window math shared by the coach and student paths.
//!
//! Both windows are anchored at local midnight of the anchor date in the
//! caller's zone. Publishing and the coach's view span 8 calendar days; the
//! student's view spans 7 and never starts before today. The two spans
//! differ on purpose and must stay that way.

use chrono::{
    DateTime, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

pub const PUBLISH_WINDOW_DAYS: u64 = 8;
pub const AVAILABLE_WINDOW_DAYS: u64 = 7;

/// Half-open range of instants `[start, end)` matched against slot starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Resolves a wall-clock time in `tz` to an instant.
///
/// Ambiguous times (the repeated hour when clocks go back) take the earlier
/// instant. Times inside a gap take the first quarter hour after the gap.
pub fn local_instant(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) => t.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            for step in 1..=96 {
                let Some(later) = naive.checked_add_signed(Duration::minutes(15 * step)) else {
                    break;
                };
                if let Some(t) = tz.from_local_datetime(&later).earliest() {
                    return t.with_timezone(&Utc);
                }
            }
            Utc.from_utc_datetime(&naive)
        }
    }
}

pub fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    local_instant(date.and_time(NaiveTime::MIN), tz)
}

/// The calendar date `now` falls on in `tz`.
pub fn local_today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// `date` moved forward by `days` calendar days. Dates past the end of the
/// supported calendar are rejected rather than wrapped.
pub fn days_after(date: NaiveDate, days: u64) -> BookingResult<NaiveDate> {
    date.checked_add_days(Days::new(days)).ok_or_else(|| {
        BookingError::InvalidInput(format!("date {} is out of the supported range", date))
    })
}

/// `[anchor 00:00, anchor + 8 days 00:00)`, used for publishing and the coach
/// view. No clamping to today.
pub fn publish_window(anchor: NaiveDate, tz: Tz) -> BookingResult<Window> {
    Ok(Window {
        start: local_midnight(anchor, tz),
        end: local_midnight(days_after(anchor, PUBLISH_WINDOW_DAYS)?, tz),
    })
}

/// `[max(anchor, today) 00:00, anchor + 7 days 00:00)`, used for the student
/// view. Empty when the whole week is already behind `today`.
pub fn available_window(anchor: NaiveDate, today: NaiveDate, tz: Tz) -> BookingResult<Window> {
    let week_start = local_midnight(anchor, tz);
    let today_start = local_midnight(today, tz);
    Ok(Window {
        start: week_start.max(today_start),
        end: local_midnight(days_after(anchor, AVAILABLE_WINDOW_DAYS)?, tz),
    })
}

/// The window covering a single local day.
pub fn day_window(date: NaiveDate, tz: Tz) -> BookingResult<Window> {
    Ok(Window {
        start: local_midnight(date, tz),
        end: local_midnight(days_after(date, 1)?, tz),
    })
}

pub fn parse_date(input: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| BookingError::InvalidInput(format!("invalid date {:?}: {}", input, e)))
}

pub fn parse_time_zone(name: &str) -> BookingResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| BookingError::InvalidInput(format!("unknown time zone {:?}: {}", name, e)))
}
