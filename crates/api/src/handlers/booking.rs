//! # Booking Handlers
//!
//! End-user operations identify the caller through [`RequestUser`]; the
//! administrative ones require [`AdminAccess`]. "Today" is the current UTC
//! date.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use courtbook_core::{
    errors::CourtError,
    models::booking::{Booking, BookingDayQuery, CreateBookingRequest, RescheduleBookingRequest},
    reservation,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{
        error_handling::AppError,
        identity::{AdminAccess, RequestUser},
    },
    ApiState,
};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Path(court_id): Path<Uuid>,
    Query(query): Query<BookingDayQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    state
        .store
        .get_court(court_id)
        .await?
        .ok_or_else(|| CourtError::NotFound(format!("Court with ID {} not found", court_id)))?;

    Ok(Json(state.store.list_bookings(court_id, query.date).await?))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    RequestUser(owner_id): RequestUser,
    Path(court_id): Path<Uuid>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = reservation::place_booking(state.store.as_ref(), court_id, owner_id, payload, today()).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .store
        .get_booking(id)
        .await?
        .ok_or_else(|| CourtError::NotFound(format!("Booking with ID {} not found", id)))?;

    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn reschedule_booking(
    State(state): State<Arc<ApiState>>,
    RequestUser(requester): RequestUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RescheduleBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = reservation::reschedule_booking(state.store.as_ref(), id, requester, payload, today()).await?;
    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    RequestUser(requester): RequestUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(reservation::cancel_booking(state.store.as_ref(), id, requester).await?))
}

#[axum::debug_handler]
pub async fn complete_booking(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(reservation::complete_booking(state.store.as_ref(), id).await?))
}

#[axum::debug_handler]
pub async fn purge_booking(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    reservation::purge_booking(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
