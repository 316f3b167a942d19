//! # Opening Rule Handlers
//!
//! Weekdays travel as integers, 0 for Monday through 6 for Sunday.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Weekday;
use courtbook_core::{
    errors::CourtError,
    models::opening_rule::{
        weekday_from_index, CreateOpeningRuleRequest, NewOpeningRule, OpeningRule, OpeningRuleChanges,
        UpdateOpeningRuleRequest,
    },
    reservation,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{error_handling::AppError, identity::AdminAccess},
    ApiState,
};

fn parse_weekday(index: u8) -> Result<Weekday, AppError> {
    weekday_from_index(index).ok_or_else(|| {
        AppError(CourtError::Validation(format!(
            "Weekday must be between 0 (Monday) and 6 (Sunday), got {}",
            index
        )))
    })
}

#[axum::debug_handler]
pub async fn list_opening_rules(
    State(state): State<Arc<ApiState>>,
    Path(court_id): Path<Uuid>,
) -> Result<Json<Vec<OpeningRule>>, AppError> {
    state
        .store
        .get_court(court_id)
        .await?
        .ok_or_else(|| CourtError::NotFound(format!("Court with ID {} not found", court_id)))?;

    Ok(Json(state.store.list_opening_rules(court_id).await?))
}

#[axum::debug_handler]
pub async fn create_opening_rule(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Path(court_id): Path<Uuid>,
    Json(payload): Json<CreateOpeningRuleRequest>,
) -> Result<(StatusCode, Json<OpeningRule>), AppError> {
    let rule = NewOpeningRule {
        court_id,
        weekday: parse_weekday(payload.weekday)?,
        start_time: payload.start_time,
        end_time: payload.end_time,
        active: payload.active.unwrap_or(true),
    };

    let rule = reservation::add_opening_rule(state.store.as_ref(), rule).await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

#[axum::debug_handler]
pub async fn update_opening_rule(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOpeningRuleRequest>,
) -> Result<Json<OpeningRule>, AppError> {
    let changes = OpeningRuleChanges {
        weekday: payload.weekday.map(parse_weekday).transpose()?,
        start_time: payload.start_time,
        end_time: payload.end_time,
        active: payload.active,
    };

    let rule = reservation::update_opening_rule(state.store.as_ref(), id, changes).await?;
    Ok(Json(rule))
}
