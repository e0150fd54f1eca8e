use async_trait::async_trait;
use coachbook_core::models::appointment::{Appointment, AppointmentId, NewAppointment};
use coachbook_core::models::user::{User, UserId, UserRole};
use coachbook_core::store::{AppointmentFilter, AppointmentStore, StoreResult, UserDirectory};
use mockall::mock;

// Mock stores for testing
mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentStore for AppointmentRepo {
        async fn insert(&self, rows: Vec<NewAppointment>) -> StoreResult<Vec<Appointment>>;

        async fn query(&self, filter: AppointmentFilter) -> StoreResult<Vec<Appointment>>;

        async fn claim(
            &self,
            id: AppointmentId,
            student_id: UserId,
        ) -> StoreResult<Option<Appointment>>;
    }
}

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserDirectory for UserRepo {
        async fn list_users(&self) -> StoreResult<Vec<User>>;

        async fn list_by_role(&self, role: UserRole) -> StoreResult<Vec<User>>;

        async fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;
    }
}
