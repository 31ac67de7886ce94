//! # Nephew Diaries Backend
//!
//! HTTP backend of the birthday time capsule. The crate is layered the
//! usual way:
//!
//! ```text
//! IO layer (REST handlers, DTO mappers)
//!     ↓
//! Domain layer (sign-in, message visibility, countdown synthesis)
//!     ↓
//! Storage layer (CSV repositories in the data directory)
//! ```
//!
//! `initialize_backend` wires the services for a configuration and
//! `create_router` mounts them under `/api`, serving the static frontend
//! bundle for every other path.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{AuthService, CountdownService, MessageService};
use crate::io::rest::{auth_apis, countdown_apis, logging_apis, message_apis, SESSION_HEADER};
use crate::storage::CsvConnection;

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub message_service: MessageService,
    pub countdown_service: CountdownService,
}

impl AppState {
    pub fn from_connection(csv_conn: Arc<CsvConnection>, birth_date: NaiveDate) -> Self {
        Self {
            auth_service: AuthService::new(csv_conn.clone()),
            message_service: MessageService::new(csv_conn.clone()),
            countdown_service: CountdownService::new(csv_conn, birth_date),
        }
    }
}

/// Open the data directory and build the application state
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Using data directory {}", config.data_dir.display());
    let csv_conn = Arc::new(CsvConnection::new(&config.data_dir)?);

    info!("Setting up domain services (birth date {})", config.birth_date);
    Ok(AppState::from_connection(csv_conn, config.birth_date))
}

/// Build the API routes without CORS or static file serving
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_apis::router())
        .nest("/messages", message_apis::router())
        .nest("/countdown", countdown_apis::router())
        .nest("/logs", logging_apis::router())
}

/// Create the full application router
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .frontend_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid frontend origin '{}'", config.frontend_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(SESSION_HEADER)]);

    Ok(Router::new()
        .nest("/api", api_router())
        .fallback_service(ServeDir::new(&config.dist_dir))
        .layer(cors)
        .with_state(app_state))
}
