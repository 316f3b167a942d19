//! # Error Handling Middleware
//!
//! Maps [`CourtError`] values to HTTP status codes and JSON error bodies so
//! every handler answers failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use courtbook_core::errors::{CourtError, Rejection};
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use courtbook_api::middleware::error_handling::AppError;
/// use courtbook_core::errors::CourtError;
/// use uuid::Uuid;
///
/// async fn handler(id: Uuid) -> Result<Json<()>, AppError> {
///     Err(AppError(CourtError::NotFound(format!("Court with ID {} not found", id))))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CourtError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CourtError::NotFound(_) => StatusCode::NOT_FOUND,
            CourtError::Validation(_) => StatusCode::BAD_REQUEST,
            CourtError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CourtError::Authorization(_) => StatusCode::FORBIDDEN,
            CourtError::Rejected(rejection) if rejection.is_conflict() => StatusCode::CONFLICT,
            CourtError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CourtError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CourtError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Rejections are shown to the user as is, without the variant prefix.
        let message = match &self.0 {
            CourtError::Rejected(rejection) => rejection.to_string(),
            CourtError::Database(_) | CourtError::Internal(_) => {
                tracing::error!(error = %self.0, "Request failed");
                "Internal server error".to_string()
            }
            err => err.to_string(),
        };

        let body = Json(json!({ "error": message, "kind": self.0.kind() }));
        (status, body).into_response()
    }
}

impl From<CourtError> for AppError {
    fn from(err: CourtError) -> Self {
        AppError(err)
    }
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        AppError(CourtError::Rejected(rejection))
    }
}
