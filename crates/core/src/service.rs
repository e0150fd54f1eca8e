//! The one entry point callers use for scheduling.
//!
//! Every operation takes the acting user's id explicitly; nothing here reads
//! session state.

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::availability::AvailabilityManager;
use crate::booking::BookingCoordinator;
use crate::clock::{Clock, SystemClock};
use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::{AgendaEntry, Appointment};
use crate::models::availability::{CoachWeek, SlotBoardEntry};
use crate::models::time_slot::TimeSlot;
use crate::models::user::{User, UserId, UserRole};
use crate::store::{AppointmentStore, UserDirectory};

pub struct SchedulingService {
    availability: AvailabilityManager,
    booking: BookingCoordinator,
    users: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
}

impl SchedulingService {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        users: Arc<dyn UserDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            availability: AvailabilityManager::new(store.clone(), clock.clone()),
            booking: BookingCoordinator::new(store, users.clone(), clock.clone()),
            users,
            clock,
        }
    }

    pub fn with_system_clock(
        store: Arc<dyn AppointmentStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self::new(store, users, Arc::new(SystemClock))
    }

    /// Today's date in `tz`, the default anchor for every window.
    pub fn today(&self, tz: Tz) -> NaiveDate {
        crate::window::local_today(self.clock.now(), tz)
    }

    pub async fn publish(
        &self,
        coach_id: UserId,
        anchor: NaiveDate,
        tz: Tz,
        slots: Vec<TimeSlot>,
    ) -> BookingResult<Vec<Appointment>> {
        self.availability.publish(coach_id, anchor, tz, slots).await
    }

    pub async fn query_available(
        &self,
        coach_id: UserId,
        anchor: NaiveDate,
        tz: Tz,
    ) -> BookingResult<Vec<TimeSlot>> {
        self.availability.query_available(coach_id, anchor, tz).await
    }

    pub async fn query_existing(
        &self,
        coach_id: UserId,
        anchor: NaiveDate,
        tz: Tz,
    ) -> BookingResult<Vec<Appointment>> {
        self.availability.query_existing(coach_id, anchor, tz).await
    }

    pub async fn coach_week(
        &self,
        coach_id: UserId,
        anchor: NaiveDate,
        tz: Tz,
    ) -> BookingResult<CoachWeek> {
        self.availability.coach_week(coach_id, anchor, tz).await
    }

    pub async fn slot_board(
        &self,
        coach_id: UserId,
        date: NaiveDate,
        tz: Tz,
    ) -> BookingResult<Vec<SlotBoardEntry>> {
        self.availability.slot_board(coach_id, date, tz).await
    }

    pub async fn reserve(
        &self,
        coach_id: UserId,
        student_id: UserId,
        slot: TimeSlot,
    ) -> BookingResult<Appointment> {
        self.booking.reserve(coach_id, student_id, slot).await
    }

    pub async fn upcoming_for_coach(&self, coach_id: UserId) -> BookingResult<Vec<AgendaEntry>> {
        self.booking.upcoming_for_coach(coach_id).await
    }

    pub async fn upcoming_for_student(
        &self,
        student_id: UserId,
    ) -> BookingResult<Vec<AgendaEntry>> {
        self.booking.upcoming_for_student(student_id).await
    }

    pub async fn list_users(&self) -> BookingResult<Vec<User>> {
        Ok(self.users.list_users().await?)
    }

    pub async fn list_coaches(&self) -> BookingResult<Vec<User>> {
        Ok(self.users.list_by_role(UserRole::Coach).await?)
    }

    pub async fn get_user(&self, id: UserId) -> BookingResult<User> {
        self.users
            .get_user(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("User with ID {} not found", id)))
    }

    /// Looks up `id` and checks it holds `role`.
    pub async fn require_role(&self, id: UserId, role: UserRole) -> BookingResult<User> {
        let user = self.get_user(id).await?;
        if user.role != role {
            return Err(BookingError::NotFound(format!("No {} found with ID {}", role, id)));
        }
        Ok(user)
    }
}
