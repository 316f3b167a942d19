use axum::http::StatusCode;
use chrono::{NaiveTime, Weekday};
use courtbook_core::models::opening_rule::OpeningRule;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{admin, create_court, test_server};

#[tokio::test]
async fn test_list_rules_uses_weekday_indexes() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    let rules = server
        .get(&format!("/api/courts/{}/opening-rules", court.id))
        .await
        .json::<Vec<OpeningRule>>();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].weekday, Weekday::Mon);
    assert!(rules[0].active);

    let raw = server
        .get(&format!("/api/courts/{}/opening-rules", court.id))
        .await
        .json::<Value>();
    assert_eq!(raw[0]["weekday"], 0);
}

#[tokio::test]
async fn test_contiguous_rule_accepted_overlapping_rule_conflicts() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;
    let path = format!("/api/courts/{}/opening-rules", court.id);

    let (name, value) = admin();
    server
        .post(&path)
        .add_header(name, value)
        .json(&json!({ "weekday": 0, "start_time": "13:00:00", "end_time": "18:00:00" }))
        .await
        .assert_status(StatusCode::CREATED);

    let (name, value) = admin();
    let response = server
        .post(&path)
        .add_header(name, value)
        .json(&json!({ "weekday": 0, "start_time": "12:00:00", "end_time": "14:00:00" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["kind"], "rule_overlap");
}

#[tokio::test]
async fn test_rule_validation_errors() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;
    let path = format!("/api/courts/{}/opening-rules", court.id);

    let (name, value) = admin();
    let response = server
        .post(&path)
        .add_header(name, value)
        .json(&json!({ "weekday": 7, "start_time": "09:00:00", "end_time": "10:00:00" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let (name, value) = admin();
    let response = server
        .post(&path)
        .add_header(name, value)
        .json(&json!({ "weekday": 2, "start_time": "10:00:00", "end_time": "09:00:00" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["kind"], "invalid_range");
}

#[tokio::test]
async fn test_update_rule() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    let rule = server
        .get(&format!("/api/courts/{}/opening-rules", court.id))
        .await
        .json::<Vec<OpeningRule>>()
        .remove(0);

    let (name, value) = admin();
    let updated = server
        .put(&format!("/api/opening-rules/{}", rule.id))
        .add_header(name, value)
        .json(&json!({ "end_time": "15:00:00", "active": false }))
        .await
        .json::<OpeningRule>();

    assert_eq!(updated.id, rule.id);
    assert_eq!(updated.end_time, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
    assert!(!updated.active);
}
