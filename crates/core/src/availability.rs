//! Coach availability: publishing windows and reading them back.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::{Appointment, AppointmentStatus, NewAppointment};
use crate::models::availability::{CoachWeek, SlotBoardEntry, SlotState};
use crate::models::time_slot::TimeSlot;
use crate::models::user::UserId;
use crate::slots;
use crate::store::{AppointmentFilter, AppointmentStore, OrderBy, StoreError, StudentFilter};
use crate::window::{self, Window};

pub struct AvailabilityManager {
    store: Arc<dyn AppointmentStore>,
    clock: Arc<dyn Clock>,
}

impl AvailabilityManager {
    pub fn new(store: Arc<dyn AppointmentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn today(&self, tz: Tz) -> NaiveDate {
        window::local_today(self.clock.now(), tz)
    }

    /// Publishes `slots` as open appointments for the 8-day window starting
    /// at `anchor`. Refuses to touch a window that already has rows.
    pub async fn publish(
        &self,
        coach_id: UserId,
        anchor: NaiveDate,
        tz: Tz,
        slots: Vec<TimeSlot>,
    ) -> BookingResult<Vec<Appointment>> {
        let window = window::publish_window(anchor, tz)?;
        validate_selection(&slots, window)?;

        let today = self.today(tz);
        if anchor < today {
            warn!(coach_id, %anchor, %today, "Rejected publish for a past anchor");
            return Err(BookingError::InvalidInput(format!(
                "cannot publish availability starting {} before today ({})",
                anchor, today
            )));
        }

        let existing = self.rows_in(coach_id, window).await?;
        if !existing.is_empty() {
            info!(
                coach_id,
                %anchor,
                existing = existing.len(),
                "Window already published"
            );
            return Err(BookingError::WindowAlreadyPublished(anchor));
        }

        let rows = slots
            .into_iter()
            .map(|slot| NewAppointment::open(coach_id, slot))
            .collect();
        let inserted = self.store.insert(rows).await.map_err(|err| match err {
            StoreError::Conflict(_) => BookingError::WindowAlreadyPublished(anchor),
            other => other.into(),
        })?;

        info!(coach_id, %anchor, count = inserted.len(), "Published availability");
        Ok(inserted)
    }

    /// Open slots a student may book, from today (or the anchor, if later)
    /// through the end of the anchor's 7-day week.
    pub async fn query_available(
        &self,
        coach_id: UserId,
        anchor: NaiveDate,
        tz: Tz,
    ) -> BookingResult<Vec<TimeSlot>> {
        let window = window::available_window(anchor, self.today(tz), tz)?;
        if window.is_empty() {
            debug!(coach_id, %anchor, "Available window lies in the past");
            return Ok(Vec::new());
        }

        let filter = AppointmentFilter::for_coach(coach_id)
            .with_student(StudentFilter::Unassigned)
            .starting_within(window)
            .ordered_by(OrderBy::StartTime);
        let rows = self.store.query(filter).await?;

        debug!(coach_id, %anchor, count = rows.len(), "Fetched available slots");
        Ok(rows.iter().map(Appointment::slot).collect())
    }

    /// Every row, open or booked, in the coach's 8-day window.
    pub async fn query_existing(
        &self,
        coach_id: UserId,
        anchor: NaiveDate,
        tz: Tz,
    ) -> BookingResult<Vec<Appointment>> {
        let window = window::publish_window(anchor, tz)?;
        self.rows_in(coach_id, window).await
    }

    pub async fn coach_week(
        &self,
        coach_id: UserId,
        anchor: NaiveDate,
        tz: Tz,
    ) -> BookingResult<CoachWeek> {
        let window = window::publish_window(anchor, tz)?;
        let existing = self.rows_in(coach_id, window).await?;

        let (proposed, can_publish) = if existing.is_empty() {
            (slots::default_week(anchor, tz), anchor >= self.today(tz))
        } else {
            (existing.iter().map(Appointment::slot).collect(), false)
        };

        Ok(CoachWeek {
            anchor,
            window,
            existing,
            proposed,
            can_publish,
        })
    }

    /// The twelve candidate slots of `date`, each tagged with its state for
    /// this coach.
    pub async fn slot_board(
        &self,
        coach_id: UserId,
        date: NaiveDate,
        tz: Tz,
    ) -> BookingResult<Vec<SlotBoardEntry>> {
        let day = window::day_window(date, tz)?;
        let rows = self.rows_in(coach_id, day).await?;

        let mut states: HashMap<TimeSlot, SlotState> = HashMap::new();
        for row in &rows {
            let state = match row.status() {
                AppointmentStatus::Booked => SlotState::Booked,
                AppointmentStatus::Open => SlotState::Available,
            };
            states
                .entry(row.slot())
                .and_modify(|current| {
                    if state == SlotState::Booked {
                        *current = SlotState::Booked;
                    }
                })
                .or_insert(state);
        }

        Ok(slots::generate_day(date, tz)
            .into_iter()
            .map(|slot| SlotBoardEntry {
                slot,
                state: states.get(&slot).copied().unwrap_or(SlotState::Unselected),
            })
            .collect())
    }

    async fn rows_in(&self, coach_id: UserId, window: Window) -> BookingResult<Vec<Appointment>> {
        let filter = AppointmentFilter::for_coach(coach_id)
            .starting_within(window)
            .ordered_by(OrderBy::StartTime);
        Ok(self.store.query(filter).await?)
    }
}

fn validate_selection(slots: &[TimeSlot], window: Window) -> BookingResult<()> {
    if slots.is_empty() {
        return Err(BookingError::InvalidInput(
            "select at least one availability slot".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(slots.len());
    for slot in slots {
        TimeSlot::new(slot.start, slot.end)?;
        if !window.contains(slot.start) {
            return Err(BookingError::InvalidInput(format!(
                "slot starting {} is outside the publish window",
                slot.start.to_rfc3339()
            )));
        }
        if !seen.insert(*slot) {
            return Err(BookingError::InvalidInput(format!(
                "slot starting {} is selected twice",
                slot.start.to_rfc3339()
            )));
        }
    }
    Ok(())
}
