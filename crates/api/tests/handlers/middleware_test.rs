use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse};
use chrono::{NaiveTime, Utc, Weekday};
use courtbook_api::middleware::error_handling::AppError;
use courtbook_core::{
    errors::{CourtError, Rejection},
    models::{
        booking::{Booking, BookingStatus},
        opening_rule::OpeningRule,
        venue::Court,
    },
};
use courtbook_db::mock::MockStore;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{admin, monday, server_with_store, user, ADMIN_TOKEN};

fn booking() -> Booking {
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        court_id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        date: monday(),
        start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        status: BookingStatus::Confirmed,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn rule() -> OpeningRule {
    OpeningRule {
        id: Uuid::new_v4(),
        court_id: Uuid::new_v4(),
        weekday: Weekday::Mon,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
        active: true,
    }
}

#[rstest]
#[case(CourtError::NotFound("Court".to_string()), StatusCode::NOT_FOUND)]
#[case(CourtError::Validation("bad".to_string()), StatusCode::BAD_REQUEST)]
#[case(CourtError::Authentication("who".to_string()), StatusCode::UNAUTHORIZED)]
#[case(CourtError::Authorization("no".to_string()), StatusCode::FORBIDDEN)]
#[case(CourtError::Rejected(Rejection::Overlap(Box::new(booking()))), StatusCode::CONFLICT)]
#[case(CourtError::Rejected(Rejection::RuleOverlap(Box::new(rule()))), StatusCode::CONFLICT)]
#[case(CourtError::Rejected(Rejection::PastDate), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(CourtError::Rejected(Rejection::InvalidDuration { minutes: 20 }), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(CourtError::Rejected(Rejection::NoOpeningHours { weekday: Weekday::Sun }), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(CourtError::Database(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(CourtError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_status_mapping(#[case] error: CourtError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).status(), expected);
}

#[test]
fn test_rejection_converts_into_a_response() {
    let response = AppError::from(Rejection::OutsideOpeningHours).into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_database_failure_is_hidden_behind_500() {
    let mut store = MockStore::new();
    store
        .expect_list_venues()
        .returning(|| Err(CourtError::Database(eyre::eyre!("password authentication failed"))));

    let server = server_with_store(Arc::new(store), Some(ADMIN_TOKEN));
    let response = server.get("/api/venues").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal server error", "kind": "database" })
    );
}

#[tokio::test]
async fn test_store_failure_while_locking_is_500() {
    let court_id = Uuid::new_v4();
    let mut store = MockStore::new();
    store.expect_get_court().with(eq(court_id)).returning(move |id| {
        Ok(Some(Court {
            id,
            venue_id: Uuid::new_v4(),
            name: "Court 1".to_string(),
            kind: None,
            created_at: Utc::now(),
        }))
    });
    store
        .expect_lock()
        .times(1)
        .returning(|_| Err(CourtError::Database(eyre::eyre!("could not obtain lock"))));

    let server = server_with_store(Arc::new(store), Some(ADMIN_TOKEN));
    let (name, value) = user(Uuid::new_v4());
    let response = server
        .post(&format!("/api/courts/{}/bookings", court_id))
        .add_header(name, value)
        .json(&json!({ "date": monday(), "start_time": "10:00:00", "end_time": "11:00:00" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_malformed_user_id_is_unauthenticated() {
    let server = server_with_store(Arc::new(MockStore::new()), Some(ADMIN_TOKEN));

    let response = server
        .post(&format!("/api/bookings/{}/cancel", Uuid::new_v4()))
        .add_header(
            axum::http::HeaderName::from_static("x-user-id"),
            axum::http::HeaderValue::from_static("not-a-uuid"),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_admin_token_is_forbidden() {
    let server = server_with_store(Arc::new(MockStore::new()), Some(ADMIN_TOKEN));

    let response = server
        .delete(&format!("/api/admin/bookings/{}", Uuid::new_v4()))
        .add_header(
            axum::http::HeaderName::from_static("x-admin-token"),
            axum::http::HeaderValue::from_static("guess"),
        )
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_routes_disabled_without_token() {
    let server = server_with_store(Arc::new(MockStore::new()), None);
    let (name, value) = admin();

    let response = server
        .delete(&format!("/api/admin/bookings/{}", Uuid::new_v4()))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "authorization");
}

#[tokio::test]
async fn test_health_and_version() {
    let server = server_with_store(Arc::new(MockStore::new()), None);

    let health = server.get("/health").await.json::<Value>();
    assert_eq!(health, json!({ "service": "courtbook", "status": "ok" }));

    let version = server.get("/version").await.json::<Value>();
    assert_eq!(
        version,
        json!({ "service": "courtbook", "version": env!("CARGO_PKG_VERSION") })
    );
}
