use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::appointment::Appointment;
use super::time_slot::TimeSlot;
use super::user::UserId;
use crate::window::Window;

/// Where a generated candidate slot stands against a coach's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Unselected,
    Available,
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBoardEntry {
    pub slot: TimeSlot,
    pub state: SlotState,
}

/// What a coach sees for an 8-day publish window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachWeek {
    pub anchor: NaiveDate,
    pub window: Window,
    pub existing: Vec<Appointment>,
    pub proposed: Vec<TimeSlot>,
    pub can_publish: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishAvailabilityRequest {
    pub anchor: NaiveDate,
    pub tz: Option<String>,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishAvailabilityResponse {
    pub coach_id: UserId,
    pub anchor: NaiveDate,
    pub published: Vec<Appointment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    pub coach_id: UserId,
    pub anchor: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotBoardResponse {
    pub coach_id: UserId,
    pub date: NaiveDate,
    pub slots: Vec<SlotBoardEntry>,
}
