use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/users", get(handlers::users::list_users))
        .route("/api/users/:id", get(handlers::users::get_user))
        .route("/api/coaches", get(handlers::users::list_coaches))
        .route(
            "/api/session",
            get(handlers::users::current_user).post(handlers::users::select_user),
        )
}
