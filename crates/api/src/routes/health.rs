//! Liveness and build information for load balancers and deploy checks.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

const SERVICE: &str = "courtbook";

#[derive(Serialize)]
struct ServiceStatus {
    service: &'static str,
    status: &'static str,
}

#[derive(Serialize)]
struct BuildInfo {
    service: &'static str,
    version: &'static str,
}

async fn liveness() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        service: SERVICE,
        status: "ok",
    })
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        service: SERVICE,
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(liveness))
        .route("/version", get(build_info))
}
