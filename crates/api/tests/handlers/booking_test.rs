use axum::http::StatusCode;
use chrono::NaiveTime;
use courtbook_core::models::booking::{Booking, BookingStatus};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{admin, create_court, monday, test_server, user};

fn window(start: &str, end: &str) -> Value {
    json!({ "date": monday(), "start_time": start, "end_time": end, "notes": "friendly match" })
}

#[tokio::test]
async fn test_place_and_fetch_booking() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;
    let owner = Uuid::new_v4();

    let (name, value) = user(owner);
    let response = server
        .post(&format!("/api/courts/{}/bookings", court.id))
        .add_header(name, value)
        .json(&window("10:00:00", "11:00:00"))
        .await;
    response.assert_status(StatusCode::CREATED);

    let booking = response.json::<Booking>();
    assert_eq!(booking.owner_id, owner);
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.notes.as_deref(), Some("friendly match"));

    let fetched = server.get(&format!("/api/bookings/{}", booking.id)).await.json::<Booking>();
    assert_eq!(fetched, booking);

    let day = server
        .get(&format!("/api/courts/{}/bookings", court.id))
        .add_query_param("date", monday())
        .await
        .json::<Vec<Booking>>();
    assert_eq!(day, vec![booking]);
}

#[tokio::test]
async fn test_overlap_is_conflict_and_touching_is_fine() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;
    let path = format!("/api/courts/{}/bookings", court.id);

    let (name, value) = user(Uuid::new_v4());
    server
        .post(&path)
        .add_header(name, value)
        .json(&window("10:00:00", "11:00:00"))
        .await
        .assert_status(StatusCode::CREATED);

    let (name, value) = user(Uuid::new_v4());
    let response = server
        .post(&path)
        .add_header(name, value)
        .json(&window("10:30:00", "11:30:00"))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "overlap");
    assert_eq!(body["error"], "A booking already exists for this time: 10:00:00 - 11:00:00");

    let (name, value) = user(Uuid::new_v4());
    server
        .post(&path)
        .add_header(name, value)
        .json(&window("11:00:00", "12:00:00"))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_rejections_are_unprocessable() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;
    let path = format!("/api/courts/{}/bookings", court.id);

    let cases = [
        (window("14:00:00", "14:20:00"), "invalid_duration"),
        (window("11:00:00", "10:00:00"), "invalid_range"),
        (window("12:30:00", "13:30:00"), "outside_opening_hours"),
        (
            json!({ "date": "2099-01-06", "start_time": "10:00:00", "end_time": "11:00:00" }),
            "no_opening_hours",
        ),
        (
            json!({ "date": "2020-01-06", "start_time": "10:00:00", "end_time": "11:00:00" }),
            "past_date",
        ),
    ];

    for (body, kind) in cases {
        let (name, value) = user(Uuid::new_v4());
        let response = server.post(&path).add_header(name, value).json(&body).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["kind"], kind);
    }
}

#[tokio::test]
async fn test_placing_requires_user_header() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    let response = server
        .post(&format!("/api/courts/{}/bookings", court.id))
        .json(&window("10:00:00", "11:00:00"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "authentication");
}

#[tokio::test]
async fn test_reschedule_by_owner_only() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;
    let owner = Uuid::new_v4();

    let (name, value) = user(owner);
    let booking = server
        .post(&format!("/api/courts/{}/bookings", court.id))
        .add_header(name, value)
        .json(&window("10:00:00", "11:00:00"))
        .await
        .json::<Booking>();

    let (name, value) = user(Uuid::new_v4());
    server
        .put(&format!("/api/bookings/{}", booking.id))
        .add_header(name, value)
        .json(&window("10:30:00", "11:30:00"))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    // Moving over its own current interval is allowed.
    let (name, value) = user(owner);
    let moved = server
        .put(&format!("/api/bookings/{}", booking.id))
        .add_header(name, value)
        .json(&window("10:30:00", "11:30:00"))
        .await
        .json::<Booking>();
    assert_eq!(moved.id, booking.id);
    assert_eq!(moved.start_time, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
}

#[tokio::test]
async fn test_cancel_then_slot_is_bookable_again() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;
    let owner = Uuid::new_v4();
    let path = format!("/api/courts/{}/bookings", court.id);

    let (name, value) = user(owner);
    let booking = server
        .post(&path)
        .add_header(name, value)
        .json(&window("10:00:00", "11:00:00"))
        .await
        .json::<Booking>();

    let (name, value) = user(Uuid::new_v4());
    server
        .post(&format!("/api/bookings/{}/cancel", booking.id))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (name, value) = user(owner);
    let cancelled = server
        .post(&format!("/api/bookings/{}/cancel", booking.id))
        .add_header(name, value)
        .await
        .json::<Booking>();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    let (name, value) = user(owner);
    server
        .post(&format!("/api/bookings/{}/cancel", booking.id))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let (name, value) = user(Uuid::new_v4());
    server
        .post(&path)
        .add_header(name, value)
        .json(&window("10:00:00", "11:00:00"))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_admin_complete_and_purge() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    let (name, value) = user(Uuid::new_v4());
    let booking = server
        .post(&format!("/api/courts/{}/bookings", court.id))
        .add_header(name, value)
        .json(&window("09:00:00", "10:30:00"))
        .await
        .json::<Booking>();

    server
        .post(&format!("/api/bookings/{}/complete", booking.id))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = admin();
    let completed = server
        .post(&format!("/api/bookings/{}/complete", booking.id))
        .add_header(name, value)
        .await
        .json::<Booking>();
    assert_eq!(completed.status, BookingStatus::Completed);

    let (name, value) = admin();
    server
        .delete(&format!("/api/admin/bookings/{}", booking.id))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/bookings/{}", booking.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let (name, value) = admin();
    server
        .delete(&format!("/api/admin/bookings/{}", booking.id))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
