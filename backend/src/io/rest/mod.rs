//! # REST API Interface Layer
//!
//! HTTP endpoints under `/api`. Handlers translate requests into domain
//! commands and domain errors into `(StatusCode, Json({error, code}))`
//! bodies; they hold no business rules of their own.
//!
//! Callers identify themselves with the `x-session-token` header carrying
//! the token issued at sign-in.

pub mod auth_apis;
pub mod countdown_apis;
pub mod logging_apis;
pub mod mappers;
pub mod message_apis;

use axum::{
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use crate::domain::models::session::DomainSession;
use crate::AppState;

pub const SESSION_HEADER: &str = "x-session-token";

pub type ApiError = (StatusCode, Json<Value>);

pub fn error_response(status: StatusCode, message: &str, code: &str) -> ApiError {
    (status, Json(json!({ "error": message, "code": code })))
}

/// Token from the session header, if present and non-empty
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Resolve the caller's session. Unknown tokens resolve to `None`.
pub async fn current_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<DomainSession>, ApiError> {
    let Some(token) = session_token(headers) else {
        return Ok(None);
    };

    state.auth_service.get_session(&token).await.map_err(|e| {
        error!("Failed to look up session: {}", e);
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to look up session",
            "SESSION_ERROR",
        )
    })
}

/// Admin gate for message administration
pub async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<DomainSession, ApiError> {
    match current_session(state, headers).await? {
        Some(session) if session.is_admin() => Ok(session),
        Some(_) => Err(error_response(
            StatusCode::FORBIDDEN,
            "Only admins can change messages",
            "FORBIDDEN",
        )),
        None => Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Sign in required",
            "UNAUTHENTICATED",
        )),
    }
}
