use async_trait::async_trait;
use coachbook_core::models::appointment::{Appointment, NewAppointment};
use coachbook_core::models::user::{User, UserRole};
use coachbook_core::store::{
    AppointmentFilter, AppointmentStore, StoreError, StoreResult, UserDirectory,
};

use crate::DbPool;
use crate::repositories::{appointment, user};

/// Maps repository failures onto the store contract. Unique-index violations
/// become [`StoreError::Conflict`]; everything else is treated as the store
/// being unavailable.
fn store_error(report: eyre::Report) -> StoreError {
    let conflict = report
        .downcast_ref::<sqlx::Error>()
        .and_then(|err| err.as_database_error())
        .filter(|db_err| db_err.is_unique_violation())
        .map(|db_err| db_err.message().to_string());

    match conflict {
        Some(message) => StoreError::Conflict(message),
        None => {
            tracing::error!("Appointment store failure: {:#}", report);
            StoreError::Unavailable(report)
        }
    }
}

#[derive(Clone)]
pub struct PgAppointmentStore {
    pool: DbPool,
}

impl PgAppointmentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentStore for PgAppointmentStore {
    async fn insert(&self, rows: Vec<NewAppointment>) -> StoreResult<Vec<Appointment>> {
        let inserted = appointment::insert_appointments(&self.pool, &rows)
            .await
            .map_err(store_error)?;
        Ok(inserted.into_iter().map(Appointment::from).collect())
    }

    async fn query(&self, filter: AppointmentFilter) -> StoreResult<Vec<Appointment>> {
        let rows = appointment::query_appointments(&self.pool, &filter)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn claim(&self, id: i64, student_id: i64) -> StoreResult<Option<Appointment>> {
        let claimed = appointment::claim_appointment(&self.pool, id, student_id)
            .await
            .map_err(store_error)?;
        Ok(claimed.map(Appointment::from))
    }
}

#[derive(Clone)]
pub struct PgUserDirectory {
    pool: DbPool,
}

impl PgUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let rows = user::list_users(&self.pool).await.map_err(store_error)?;
        rows.into_iter()
            .map(|row| User::try_from(row).map_err(StoreError::Unavailable))
            .collect()
    }

    async fn list_by_role(&self, role: UserRole) -> StoreResult<Vec<User>> {
        let rows = user::list_users_by_role(&self.pool, role)
            .await
            .map_err(store_error)?;
        rows.into_iter()
            .map(|row| User::try_from(row).map_err(StoreError::Unavailable))
            .collect()
    }

    async fn get_user(&self, id: i64) -> StoreResult<Option<User>> {
        let row = user::get_user_by_id(&self.pool, id)
            .await
            .map_err(store_error)?;
        row.map(|row| User::try_from(row).map_err(StoreError::Unavailable))
            .transpose()
    }
}
