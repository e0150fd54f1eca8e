use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/coaches/:coach_id/availability",
            get(handlers::booking::available_slots),
        )
        .route(
            "/api/coaches/:coach_id/bookings",
            post(handlers::booking::reserve_slot),
        )
        .route(
            "/api/coach/appointments",
            get(handlers::booking::coach_appointments),
        )
        .route(
            "/api/student/appointments",
            get(handlers::booking::student_appointments),
        )
}
