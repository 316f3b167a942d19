use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/courts/:id/opening-rules",
            get(handlers::opening_rule::list_opening_rules).post(handlers::opening_rule::create_opening_rule),
        )
        .route(
            "/api/opening-rules/:id",
            put(handlers::opening_rule::update_opening_rule),
        )
}
