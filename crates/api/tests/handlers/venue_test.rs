use axum::http::StatusCode;
use courtbook_core::models::venue::{Court, Venue};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{admin, create_court, create_venue, test_server};

#[tokio::test]
async fn test_register_and_list_venues() {
    let (server, _store) = test_server();

    let venue = create_venue(&server).await;
    assert_eq!(venue.name, "Parque Norte");

    let venues = server.get("/api/venues").await.json::<Vec<Venue>>();
    assert_eq!(venues, vec![venue]);
}

#[tokio::test]
async fn test_register_venue_requires_admin() {
    let (server, _store) = test_server();

    let response = server
        .post("/api/venues")
        .json(&json!({ "name": "Parque Norte", "address": "x", "locality": "y" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_court_for_unknown_venue() {
    let (server, _store) = test_server();
    let (name, value) = admin();

    let response = server
        .post("/api/courts")
        .add_header(name, value)
        .json(&json!({ "venue_id": Uuid::new_v4(), "name": "Court 9" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "not_found");
}

#[tokio::test]
async fn test_court_detail_and_filters() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    let fetched = server.get(&format!("/api/courts/{}", court.id)).await.json::<Court>();
    assert_eq!(fetched, court);

    let by_venue = server
        .get("/api/courts")
        .add_query_param("venue_id", court.venue_id)
        .await
        .json::<Vec<Court>>();
    assert_eq!(by_venue, vec![court.clone()]);

    let padel = server
        .get("/api/courts")
        .add_query_param("kind", "padel")
        .await
        .json::<Vec<Court>>();
    assert!(padel.is_empty());

    server
        .get(&format!("/api/courts/{}", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_venue_and_filter_courts_by_locality() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    let in_centro = server
        .get("/api/courts")
        .add_query_param("locality", "Centro")
        .await
        .json::<Vec<Court>>();
    assert_eq!(in_centro, vec![court.clone()]);

    let (name, value) = admin();
    let venue = server
        .put(&format!("/api/venues/{}", court.venue_id))
        .add_header(name, value)
        .json(&json!({ "locality": "Sur" }))
        .await
        .json::<Venue>();
    assert_eq!(venue.name, "Parque Norte");
    assert_eq!(venue.locality, "Sur");

    let fetched = server.get(&format!("/api/venues/{}", venue.id)).await.json::<Venue>();
    assert_eq!(fetched, venue);

    let in_centro = server
        .get("/api/courts")
        .add_query_param("locality", "Centro")
        .await
        .json::<Vec<Court>>();
    assert!(in_centro.is_empty());
}

#[tokio::test]
async fn test_edit_requires_admin() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    server
        .put(&format!("/api/venues/{}", court.venue_id))
        .json(&json!({ "name": "Renamed" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .put(&format!("/api/courts/{}", court.id))
        .json(&json!({ "name": "Renamed" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_edit_court() {
    let (server, _store) = test_server();
    let court = create_court(&server).await;

    let (name, value) = admin();
    let renamed = server
        .put(&format!("/api/courts/{}", court.id))
        .add_header(name, value)
        .json(&json!({ "name": "Court A", "kind": "padel" }))
        .await
        .json::<Court>();
    assert_eq!(renamed.name, "Court A");
    assert_eq!(renamed.kind.as_deref(), Some("padel"));
    assert_eq!(renamed.venue_id, court.venue_id);

    let (name, value) = admin();
    let response = server
        .put(&format!("/api/courts/{}", court.id))
        .add_header(name, value)
        .json(&json!({ "name": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let (name, value) = admin();
    let response = server
        .put(&format!("/api/courts/{}", court.id))
        .add_header(name, value)
        .json(&json!({ "venue_id": Uuid::new_v4() }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let (name, value) = admin();
    server
        .put(&format!("/api/venues/{}", Uuid::new_v4()))
        .add_header(name, value)
        .json(&json!({}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
