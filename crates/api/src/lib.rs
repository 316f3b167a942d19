//! # Courtbook API
//!
//! HTTP surface of the court reservation service: venues, courts, opening
//! rules, free slots and bookings.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: request extraction and response shaping around the
//!   reservation services of `courtbook-core`
//! - **Middleware**: caller identity and error mapping
//! - **Config**: environment configuration
//!
//! Handlers only see a [`CourtStore`], so the same router runs against
//! PostgreSQL in production and the in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Identity extraction and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::{
    http::{header::HeaderName, HeaderValue, Method},
    Router,
};
use courtbook_core::store::CourtStore;
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::middleware::identity::{ADMIN_TOKEN_HEADER, USER_ID_HEADER};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub store: Arc<dyn CourtStore>,
    /// Expected value of the `x-admin-token` header
    pub admin_token: Option<String>,
}

impl ApiState {
    pub fn new(store: Arc<dyn CourtStore>, admin_token: Option<String>) -> Self {
        Self { store, admin_token }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Venue and court catalogue
        .merge(routes::courts::routes())
        // Weekly opening hours
        .merge(routes::opening_rules::routes())
        // Free slots
        .merge(routes::availability::routes())
        // Reservations
        .merge(routes::bookings::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            HeaderName::from_static(USER_ID_HEADER),
            HeaderName::from_static(ADMIN_TOKEN_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server with the provided configuration and store
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # async fn run() -> eyre::Result<()> {
/// let config = courtbook_api::config::ApiConfig::from_env()?;
/// let store = Arc::new(courtbook_db::MemoryStore::new());
/// courtbook_api::start_server(config, store).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn CourtStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(store, config.admin_token.clone()));
    if state.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN is not set, administrative routes are disabled");
    }

    let app = build_router(state).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(axum::error_handling::HandleErrorLayer::new(handle_timeout))
            .timeout(std::time::Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn handle_timeout(err: tower::BoxError) -> (axum::http::StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (axum::http::StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {}", err),
        )
    }
}
