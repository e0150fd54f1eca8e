//! Contracts for the persistent side of the system.
//!
//! The domain never talks to a database directly; it goes through these two
//! traits. `coachbook-db` implements them over PostgreSQL and [`memory`]
//! implements them in-process.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::appointment::{Appointment, AppointmentId, NewAppointment};
use crate::models::time_slot::TimeSlot;
use crate::models::user::{User, UserId, UserRole};
use crate::window::Window;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(#[from] eyre::Report),

    #[error("conflicting appointment: {0}")]
    Conflict(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentFilter {
    #[default]
    Any,
    Unassigned,
    Assigned,
    Is(UserId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    #[default]
    Insertion,
    StartTime,
}

/// Equality and range filters over appointment rows. Start bounds are
/// `[start_from, start_before)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppointmentFilter {
    pub coach_id: Option<UserId>,
    pub student: StudentFilter,
    pub start_from: Option<DateTime<Utc>>,
    pub start_before: Option<DateTime<Utc>>,
    pub slot: Option<TimeSlot>,
    pub order_by: OrderBy,
}

impl AppointmentFilter {
    pub fn for_coach(coach_id: UserId) -> Self {
        Self {
            coach_id: Some(coach_id),
            ..Self::default()
        }
    }

    pub fn with_student(mut self, student: StudentFilter) -> Self {
        self.student = student;
        self
    }

    pub fn starting_within(mut self, window: Window) -> Self {
        self.start_from = Some(window.start);
        self.start_before = Some(window.end);
        self
    }

    pub fn matching_slot(mut self, slot: TimeSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn ordered_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn matches(&self, row: &Appointment) -> bool {
        if self.coach_id.is_some_and(|coach_id| coach_id != row.coach_id) {
            return false;
        }
        let student_ok = match self.student {
            StudentFilter::Any => true,
            StudentFilter::Unassigned => row.student_id.is_none(),
            StudentFilter::Assigned => row.student_id.is_some(),
            StudentFilter::Is(id) => row.student_id == Some(id),
        };
        if !student_ok {
            return false;
        }
        if self.start_from.is_some_and(|from| row.start_time < from) {
            return false;
        }
        if self.start_before.is_some_and(|before| row.start_time >= before) {
            return false;
        }
        match self.slot {
            Some(slot) => row.start_time == slot.start && row.end_time == slot.end,
            None => true,
        }
    }
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Inserts every row or none of them.
    async fn insert(&self, rows: Vec<NewAppointment>) -> StoreResult<Vec<Appointment>>;

    async fn query(&self, filter: AppointmentFilter) -> StoreResult<Vec<Appointment>>;

    /// Assigns `student_id` to row `id` only if the row is still unassigned,
    /// as one indivisible step. `None` means the row was taken or is gone.
    async fn claim(&self, id: AppointmentId, student_id: UserId) -> StoreResult<Option<Appointment>>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn list_by_role(&self, role: UserRole) -> StoreResult<Vec<User>>;

    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;
}
