use chrono::{DateTime, Utc};
use coachbook_core::models::{
    appointment::Appointment,
    user::{User, UserRole},
};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i64,
    pub coach_id: i64,
    pub student_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Appointment {
            id: row.id,
            coach_id: row.coach_id,
            student_id: row.student_id,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub email: String,
    pub user_type: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbUser> for User {
    type Error = eyre::Report;

    fn try_from(row: DbUser) -> Result<Self> {
        let role = row
            .user_type
            .parse::<UserRole>()
            .map_err(|e| eyre!("user {} has an invalid type: {}", row.id, e))?;
        Ok(User {
            id: row.id,
            email: row.email,
            role,
        })
    }
}
