use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time_slot::TimeSlot;
use super::user::UserId;

pub type AppointmentId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Open,
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub coach_id: UserId,
    pub student_id: Option<UserId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn status(&self) -> AppointmentStatus {
        match self.student_id {
            Some(_) => AppointmentStatus::Booked,
            None => AppointmentStatus::Open,
        }
    }

    pub fn slot(&self) -> TimeSlot {
        TimeSlot {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// A published slot about to be written; always inserted without a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub coach_id: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl NewAppointment {
    pub fn open(coach_id: UserId, slot: TimeSlot) -> Self {
        Self {
            coach_id,
            start_time: slot.start,
            end_time: slot.end,
        }
    }
}

/// A booked appointment together with the email of the other party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub id: AppointmentId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub counterpart_id: UserId,
    pub counterpart_email: String,
}
