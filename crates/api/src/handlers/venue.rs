use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use courtbook_core::{
    errors::CourtError,
    models::venue::{
        Court, CourtFilter, CreateCourtRequest, CreateVenueRequest, UpdateCourtRequest, UpdateVenueRequest, Venue,
    },
    reservation,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{error_handling::AppError, identity::AdminAccess},
    ApiState,
};

#[axum::debug_handler]
pub async fn create_venue(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Json(payload): Json<CreateVenueRequest>,
) -> Result<(StatusCode, Json<Venue>), AppError> {
    let venue = reservation::register_venue(state.store.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(venue)))
}

#[axum::debug_handler]
pub async fn list_venues(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Venue>>, AppError> {
    Ok(Json(state.store.list_venues().await?))
}

#[axum::debug_handler]
pub async fn get_venue(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Venue>, AppError> {
    let venue = state
        .store
        .get_venue(id)
        .await?
        .ok_or_else(|| CourtError::NotFound(format!("Venue with ID {} not found", id)))?;

    Ok(Json(venue))
}

#[axum::debug_handler]
pub async fn update_venue(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVenueRequest>,
) -> Result<Json<Venue>, AppError> {
    Ok(Json(reservation::update_venue(state.store.as_ref(), id, payload).await?))
}

#[axum::debug_handler]
pub async fn create_court(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Json(payload): Json<CreateCourtRequest>,
) -> Result<(StatusCode, Json<Court>), AppError> {
    let court = reservation::register_court(state.store.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(court)))
}

#[axum::debug_handler]
pub async fn list_courts(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<CourtFilter>,
) -> Result<Json<Vec<Court>>, AppError> {
    Ok(Json(state.store.list_courts(&filter).await?))
}

#[axum::debug_handler]
pub async fn get_court(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Court>, AppError> {
    let court = state
        .store
        .get_court(id)
        .await?
        .ok_or_else(|| CourtError::NotFound(format!("Court with ID {} not found", id)))?;

    Ok(Json(court))
}

#[axum::debug_handler]
pub async fn update_court(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCourtRequest>,
) -> Result<Json<Court>, AppError> {
    Ok(Json(reservation::update_court(state.store.as_ref(), id, payload).await?))
}
