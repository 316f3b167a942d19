//! # Availability Handlers
//!
//! Lists the free slots of a court for a date. The answer is computed from an
//! unlocked read and is only a hint; placing a booking re-validates it.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use courtbook_core::{
    availability::DEFAULT_SLOT_MINUTES,
    models::slot::{SlotQuery, SlotsResponse},
    reservation,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Free slots of `duration` minutes (default 90) on `date`.
///
/// # Example
///
/// `GET /api/courts/{id}/slots?date=2030-01-07&duration=60`
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Path(court_id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let duration_minutes = query.duration.unwrap_or(DEFAULT_SLOT_MINUTES);
    let slots = reservation::available_slots(state.store.as_ref(), court_id, query.date, duration_minutes).await?;

    Ok(Json(SlotsResponse {
        court_id,
        date: query.date,
        duration_minutes,
        slots,
    }))
}
