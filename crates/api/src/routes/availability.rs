use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/coach/week", get(handlers::availability::coach_week))
        .route(
            "/api/coach/availability",
            post(handlers::availability::publish_availability),
        )
        .route("/api/coach/board", get(handlers::availability::slot_board))
}
