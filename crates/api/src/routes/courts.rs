use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/venues",
            get(handlers::venue::list_venues).post(handlers::venue::create_venue),
        )
        .route(
            "/api/venues/:id",
            get(handlers::venue::get_venue).put(handlers::venue::update_venue),
        )
        .route(
            "/api/courts",
            get(handlers::venue::list_courts).post(handlers::venue::create_court),
        )
        .route(
            "/api/courts/:id",
            get(handlers::venue::get_court).put(handlers::venue::update_court),
        )
}
