//! Caller identity extracted from request headers.
//!
//! Authentication itself happens upstream. By the time a request reaches the
//! service it carries `x-user-id` for end users and `x-admin-token` for
//! administrators.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use courtbook_core::errors::CourtError;
use uuid::Uuid;

use super::error_handling::AppError;
use crate::ApiState;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// The end user on whose behalf a booking is placed or changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestUser(pub Uuid);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = header(&parts.headers, USER_ID_HEADER).ok_or_else(|| {
            AppError(CourtError::Authentication(format!("Missing {} header", USER_ID_HEADER)))
        })?;

        let id = Uuid::parse_str(raw.trim()).map_err(|_| {
            AppError(CourtError::Authentication(format!("Invalid {} header", USER_ID_HEADER)))
        })?;

        Ok(RequestUser(id))
    }
}

/// Proof that the request carries the configured admin token.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminAccess {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<ApiState>) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token.as_deref() else {
            return Err(AppError(CourtError::Authorization(
                "Administrative access is disabled".to_string(),
            )));
        };

        match header(&parts.headers, ADMIN_TOKEN_HEADER) {
            None => Err(AppError(CourtError::Authentication(format!(
                "Missing {} header",
                ADMIN_TOKEN_HEADER
            )))),
            Some(token) if token == expected => Ok(AdminAccess),
            Some(_) => Err(AppError(CourtError::Authorization(
                "Invalid admin token".to_string(),
            ))),
        }
    }
}
