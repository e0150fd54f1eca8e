//! Student reservations and the upcoming-appointment agendas.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::{AgendaEntry, Appointment};
use crate::models::time_slot::TimeSlot;
use crate::models::user::UserId;
use crate::store::{AppointmentFilter, AppointmentStore, OrderBy, StudentFilter, UserDirectory};
use crate::window::Window;

pub const AGENDA_DAYS: i64 = 7;
const UNKNOWN_EMAIL: &str = "Unknown";

pub struct BookingCoordinator {
    store: Arc<dyn AppointmentStore>,
    users: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
}

impl BookingCoordinator {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        users: Arc<dyn UserDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            users,
            clock,
        }
    }

    /// Books `slot` with `coach_id` for `student_id`.
    ///
    /// The open row is looked up again right before the claim, and the claim
    /// itself only lands if the row is still unassigned. Losing either step
    /// to another student yields [`BookingError::SlotNoLongerAvailable`].
    pub async fn reserve(
        &self,
        coach_id: UserId,
        student_id: UserId,
        slot: TimeSlot,
    ) -> BookingResult<Appointment> {
        let slot = TimeSlot::new(slot.start, slot.end)?;

        let filter = AppointmentFilter::for_coach(coach_id)
            .with_student(StudentFilter::Unassigned)
            .matching_slot(slot)
            .ordered_by(OrderBy::Insertion);
        let candidates = self.store.query(filter).await?;

        let Some(target) = candidates.first() else {
            debug!(coach_id, student_id, start = %slot.start, "No open row for slot");
            return Err(BookingError::SlotNoLongerAvailable);
        };
        if candidates.len() > 1 {
            warn!(
                coach_id,
                start = %slot.start,
                duplicates = candidates.len(),
                "Multiple open rows for one slot, claiming the oldest"
            );
        }

        match self.store.claim(target.id, student_id).await? {
            Some(booked) => {
                info!(
                    appointment_id = booked.id,
                    coach_id,
                    student_id,
                    start = %booked.start_time,
                    "Slot booked"
                );
                Ok(booked)
            }
            None => {
                info!(
                    appointment_id = target.id,
                    coach_id,
                    student_id,
                    "Lost booking race"
                );
                Err(BookingError::SlotNoLongerAvailable)
            }
        }
    }

    /// Booked appointments of `coach_id` over the next seven days, with the
    /// student's email.
    pub async fn upcoming_for_coach(&self, coach_id: UserId) -> BookingResult<Vec<AgendaEntry>> {
        let filter = AppointmentFilter::for_coach(coach_id).with_student(StudentFilter::Assigned);
        let rows = self.upcoming(filter).await?;
        self.with_emails(rows, |row| row.student_id.unwrap_or_default())
            .await
    }

    /// Bookings held by `student_id` over the next seven days, with the
    /// coach's email.
    pub async fn upcoming_for_student(
        &self,
        student_id: UserId,
    ) -> BookingResult<Vec<AgendaEntry>> {
        let filter = AppointmentFilter::default().with_student(StudentFilter::Is(student_id));
        let rows = self.upcoming(filter).await?;
        self.with_emails(rows, |row| row.coach_id).await
    }

    async fn upcoming(&self, filter: AppointmentFilter) -> BookingResult<Vec<Appointment>> {
        let now = self.clock.now();
        let window = Window {
            start: now,
            end: now + Duration::days(AGENDA_DAYS),
        };
        let filter = filter.starting_within(window).ordered_by(OrderBy::StartTime);
        Ok(self.store.query(filter).await?)
    }

    async fn with_emails(
        &self,
        rows: Vec<Appointment>,
        counterpart: impl Fn(&Appointment) -> UserId,
    ) -> BookingResult<Vec<AgendaEntry>> {
        let mut emails: HashMap<UserId, String> = HashMap::new();
        let mut entries = Vec::with_capacity(rows.len());

        for row in rows {
            let counterpart_id = counterpart(&row);
            let email = match emails.get(&counterpart_id) {
                Some(email) => email.clone(),
                None => {
                    let email = self
                        .users
                        .get_user(counterpart_id)
                        .await?
                        .map(|user| user.email)
                        .unwrap_or_else(|| UNKNOWN_EMAIL.to_string());
                    emails.insert(counterpart_id, email.clone());
                    email
                }
            };

            entries.push(AgendaEntry {
                id: row.id,
                start: row.start_time,
                end: row.end_time,
                counterpart_id,
                counterpart_email: email,
            });
        }
        Ok(entries)
    }
}
