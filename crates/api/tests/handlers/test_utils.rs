use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::NaiveDate;
use courtbook_api::{
    build_router,
    middleware::identity::{ADMIN_TOKEN_HEADER, USER_ID_HEADER},
    ApiState,
};
use courtbook_core::{
    models::venue::{Court, Venue},
    store::CourtStore,
};
use courtbook_db::MemoryStore;
use serde_json::json;
use uuid::Uuid;

pub const ADMIN_TOKEN: &str = "test-admin-token";

pub fn server_with_store(store: Arc<dyn CourtStore>, admin_token: Option<&str>) -> TestServer {
    let state = Arc::new(ApiState::new(store, admin_token.map(str::to_string)));
    TestServer::new(build_router(state)).unwrap()
}

/// Server over a fresh in-memory store. The store handle shares its tables
/// with the server.
pub fn test_server() -> (TestServer, MemoryStore) {
    let store = MemoryStore::new();
    let server = server_with_store(Arc::new(store.clone()), Some(ADMIN_TOKEN));
    (server, store)
}

pub fn admin() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(ADMIN_TOKEN_HEADER),
        HeaderValue::from_static(ADMIN_TOKEN),
    )
}

pub fn user(id: Uuid) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(USER_ID_HEADER),
        HeaderValue::from_str(&id.to_string()).unwrap(),
    )
}

/// A far-future Monday, always bookable.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 1, 5).unwrap()
}

pub fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 1, 6).unwrap()
}

pub async fn create_venue(server: &TestServer) -> Venue {
    let (name, value) = admin();
    server
        .post("/api/venues")
        .add_header(name, value)
        .json(&json!({
            "name": "Parque Norte",
            "address": "Av. Principal 123",
            "locality": "Centro"
        }))
        .await
        .json::<Venue>()
}

/// A court open on Mondays from 09:00 to 13:00.
pub async fn create_court(server: &TestServer) -> Court {
    let venue = create_venue(server).await;

    let (name, value) = admin();
    let court = server
        .post("/api/courts")
        .add_header(name, value)
        .json(&json!({ "venue_id": venue.id, "name": "Court 1", "kind": "5-a-side" }))
        .await
        .json::<Court>();

    let (name, value) = admin();
    server
        .post(&format!("/api/courts/{}/opening-rules", court.id))
        .add_header(name, value)
        .json(&json!({ "weekday": 0, "start_time": "09:00:00", "end_time": "13:00:00" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    court
}
