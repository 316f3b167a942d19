use axum::http::StatusCode;
use chrono::NaiveTime;
use courtbook_core::models::slot::SlotsResponse;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{create_court, monday, test_server, tuesday, user};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[tokio::test]
async fn test_default_duration_lists_ninety_minute_slots() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    let response = server
        .get(&format!("/api/courts/{}/slots", court.id))
        .add_query_param("date", monday())
        .await
        .json::<SlotsResponse>();

    assert_eq!(response.court_id, court.id);
    assert_eq!(response.duration_minutes, 90);
    let starts: Vec<_> = response.slots.iter().map(|slot| slot.start_time).collect();
    assert_eq!(starts, vec![t(9, 0), t(9, 30), t(10, 0), t(10, 30), t(11, 0), t(11, 30)]);
    assert!(response.slots.iter().all(|slot| slot.available));
}

#[tokio::test]
async fn test_booked_time_is_not_offered() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    let (name, value) = user(Uuid::new_v4());
    server
        .post(&format!("/api/courts/{}/bookings", court.id))
        .add_header(name, value)
        .json(&json!({ "date": monday(), "start_time": "10:00:00", "end_time": "11:00:00" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get(&format!("/api/courts/{}/slots", court.id))
        .add_query_param("date", monday())
        .add_query_param("duration", 60)
        .await
        .json::<SlotsResponse>();

    let starts: Vec<_> = response.slots.iter().map(|slot| slot.start_time).collect();
    assert_eq!(starts, vec![t(9, 0), t(11, 0), t(11, 30), t(12, 0)]);
}

#[tokio::test]
async fn test_closed_day_has_no_slots() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    let response = server
        .get(&format!("/api/courts/{}/slots", court.id))
        .add_query_param("date", tuesday())
        .await
        .json::<SlotsResponse>();

    assert!(response.slots.is_empty());
}

#[rstest]
#[case(20)]
#[case(0)]
#[case(300)]
#[tokio::test]
async fn test_duration_out_of_bounds_is_bad_request(#[case] duration: i64) {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    let response = server
        .get(&format!("/api/courts/{}/slots", court.id))
        .add_query_param("date", monday())
        .add_query_param("duration", duration)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "validation");
}

#[tokio::test]
async fn test_unknown_court_has_no_slots() {
    let (server, _store) = test_server();

    server
        .get(&format!("/api/courts/{}/slots", Uuid::new_v4()))
        .add_query_param("date", monday())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
