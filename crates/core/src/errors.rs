use chrono::Weekday;
use thiserror::Error;

use crate::availability::{MAX_BOOKING_MINUTES, MIN_BOOKING_MINUTES};
use crate::models::{booking::Booking, opening_rule::OpeningRule};

/// Reasons the availability engine refuses a booking or an opening rule.
///
/// These are ordinary validation outcomes. Callers turn them into a message
/// for the user, who can then pick another time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("Start time must be before end time")]
    InvalidRange,

    #[error(
        "Bookings must last between {} and {} minutes, got {}",
        MIN_BOOKING_MINUTES,
        MAX_BOOKING_MINUTES,
        .minutes
    )]
    InvalidDuration { minutes: i64 },

    #[error("Bookings cannot be made for past dates")]
    PastDate,

    #[error("The court has no opening hours on {weekday}")]
    NoOpeningHours { weekday: Weekday },

    #[error("The selected time is outside the court's opening hours")]
    OutsideOpeningHours,

    #[error("A booking already exists for this time: {} - {}", .0.start_time, .0.end_time)]
    Overlap(Box<Booking>),

    #[error(
        "This opening rule overlaps an existing rule: {} - {}",
        .0.start_time,
        .0.end_time
    )]
    RuleOverlap(Box<OpeningRule>),
}

impl Rejection {
    /// Stable machine-readable name of the rejection kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::InvalidRange => "invalid_range",
            Rejection::InvalidDuration { .. } => "invalid_duration",
            Rejection::PastDate => "past_date",
            Rejection::NoOpeningHours { .. } => "no_opening_hours",
            Rejection::OutsideOpeningHours => "outside_opening_hours",
            Rejection::Overlap(_) => "overlap",
            Rejection::RuleOverlap(_) => "rule_overlap",
        }
    }

    /// True when the rejection is caused by another stored entity.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Rejection::Overlap(_) | Rejection::RuleOverlap(_))
    }
}

#[derive(Error, Debug)]
pub enum CourtError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CourtError {
    pub fn kind(&self) -> &'static str {
        match self {
            CourtError::NotFound(_) => "not_found",
            CourtError::Validation(_) => "validation",
            CourtError::Authentication(_) => "authentication",
            CourtError::Authorization(_) => "authorization",
            CourtError::Rejected(rejection) => rejection.kind(),
            CourtError::Database(_) => "database",
            CourtError::Internal(_) => "internal",
        }
    }
}

pub type CourtResult<T> = Result<T, CourtError>;
