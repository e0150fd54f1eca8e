//! Candidate slot generation.
//!
//! A day is cut into twelve 2-hour slots starting at local midnight. Slot
//! boundaries are wall-clock times in the caller's zone, so on a DST
//! transition day the slot spanning the change is one hour shorter or longer
//! while the day stays covered end to end.

use std::ops::RangeInclusive;

use chrono::{Days, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::models::time_slot::TimeSlot;
use crate::window::{PUBLISH_WINDOW_DAYS, local_instant};

pub const SLOT_HOURS: i64 = 2;
pub const SLOTS_PER_DAY: i64 = 12;

/// Start hours that count as a standard offering. The 2-hour catalog never
/// produces 9:00 itself, so this keeps 10, 12, 14 and 16.
pub const BUSINESS_HOURS: RangeInclusive<u32> = 9..=17;

/// Empty for the last day of the supported calendar, which has no next
/// midnight to end on.
pub fn generate_day(date: NaiveDate, tz: Tz) -> Vec<TimeSlot> {
    let midnight = date.and_time(NaiveTime::MIN);
    let boundaries: Option<Vec<_>> = (0..=SLOTS_PER_DAY)
        .map(|i| {
            midnight
                .checked_add_signed(Duration::hours(i * SLOT_HOURS))
                .map(|boundary| local_instant(boundary, tz))
        })
        .collect();
    let Some(boundaries) = boundaries else {
        return Vec::new();
    };

    boundaries
        .windows(2)
        .filter_map(|pair| TimeSlot::new(pair[0], pair[1]).ok())
        .collect()
}

pub fn is_business_hours(slot: &TimeSlot, tz: Tz) -> bool {
    BUSINESS_HOURS.contains(&slot.local_start_hour(tz))
}

pub fn business_day(date: NaiveDate, tz: Tz) -> Vec<TimeSlot> {
    generate_day(date, tz)
        .into_iter()
        .filter(|slot| is_business_hours(slot, tz))
        .collect()
}

/// The pre-selection offered to a coach whose window is still empty: business
/// hours on every day of the publish window.
pub fn default_week(anchor: NaiveDate, tz: Tz) -> Vec<TimeSlot> {
    (0..PUBLISH_WINDOW_DAYS)
        .filter_map(|offset| anchor.checked_add_days(Days::new(offset)))
        .flat_map(|day| business_day(day, tz))
        .collect()
}
