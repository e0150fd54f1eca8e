use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::appointment::{AgendaEntry, Appointment};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveSlotRequest {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveSlotResponse {
    pub appointment: Appointment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaResponse {
    pub appointments: Vec<AgendaEntry>,
}
