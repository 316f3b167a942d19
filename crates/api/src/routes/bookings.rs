use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/courts/:id/bookings",
            get(handlers::booking::list_bookings).post(handlers::booking::create_booking),
        )
        .route(
            "/api/bookings/:id",
            get(handlers::booking::get_booking).put(handlers::booking::reschedule_booking),
        )
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::booking::cancel_booking),
        )
        .route(
            "/api/bookings/:id/complete",
            post(handlers::booking::complete_booking),
        )
        .route(
            "/api/admin/bookings/:id",
            delete(handlers::booking::purge_booking),
        )
}
