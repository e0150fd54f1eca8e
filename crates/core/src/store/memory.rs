use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{AppointmentFilter, AppointmentStore, OrderBy, StoreError, StoreResult, UserDirectory};
use crate::models::appointment::{Appointment, AppointmentId, NewAppointment};
use crate::models::user::{User, UserId, UserRole};

#[derive(Debug, Default)]
struct Rows {
    appointments: Vec<Appointment>,
    next_id: AppointmentId,
}

/// Process-local appointment table with the same guarantees as the
/// PostgreSQL one: unique `(coach_id, start_time, end_time)`, all-or-nothing
/// inserts and a claim that checks and sets under one write lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: RwLock<Rows>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.appointments.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AppointmentStore for InMemoryStore {
    async fn insert(&self, rows: Vec<NewAppointment>) -> StoreResult<Vec<Appointment>> {
        let mut guard = self.rows.write().await;

        for (i, row) in rows.iter().enumerate() {
            let clashes_existing = guard.appointments.iter().any(|existing| {
                existing.coach_id == row.coach_id
                    && existing.start_time == row.start_time
                    && existing.end_time == row.end_time
            });
            if clashes_existing || rows[..i].contains(row) {
                return Err(StoreError::Conflict(format!(
                    "coach {} already has a slot at {}",
                    row.coach_id,
                    row.start_time.to_rfc3339()
                )));
            }
        }

        let now = Utc::now();
        let mut inserted = Vec::with_capacity(rows.len());
        for row in rows {
            guard.next_id += 1;
            let appointment = Appointment {
                id: guard.next_id,
                coach_id: row.coach_id,
                student_id: None,
                start_time: row.start_time,
                end_time: row.end_time,
                created_at: now,
            };
            guard.appointments.push(appointment.clone());
            inserted.push(appointment);
        }
        Ok(inserted)
    }

    async fn query(&self, filter: AppointmentFilter) -> StoreResult<Vec<Appointment>> {
        let guard = self.rows.read().await;
        let mut found: Vec<Appointment> = guard
            .appointments
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();

        match filter.order_by {
            OrderBy::Insertion => found.sort_by_key(|row| row.id),
            OrderBy::StartTime => found.sort_by_key(|row| (row.start_time, row.id)),
        }
        Ok(found)
    }

    async fn claim(&self, id: AppointmentId, student_id: UserId) -> StoreResult<Option<Appointment>> {
        let mut guard = self.rows.write().await;
        let claimed = guard
            .appointments
            .iter_mut()
            .find(|row| row.id == id && row.student_id.is_none())
            .map(|row| {
                row.student_id = Some(student_id);
                row.clone()
            });
        Ok(claimed)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<Vec<User>>,
}

impl InMemoryDirectory {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    pub async fn add_user(&self, user: User) {
        self.users.write().await.push(user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn list_by_role(&self, role: UserRole) -> StoreResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|user| user.role == role)
            .cloned()
            .collect())
    }

    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|user| user.id == id).cloned())
    }
}
