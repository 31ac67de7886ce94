//! # REST API for Sign-in and Sessions
//!
//! - `POST /api/auth/sign-in`: check credentials and issue a session
//! - `POST /api/auth/sign-out`: forget the session named by the header
//! - `GET /api/auth/session`: who the session header belongs to

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::{error, info, warn};

use super::mappers::UserMapper;
use super::{error_response, session_token, ApiError};
use crate::domain::commands::auth::SignInCommand;
use crate::domain::SignInError;
use crate::AppState;
use shared::{SessionResponse, SignInRequest, SignInResponse, SignOutResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
        .route("/session", get(get_session))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    info!("POST /api/auth/sign-in - email: {}", request.email);

    if request.email.is_empty() || request.password.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Email and password are required",
            "INVALID_INPUT",
        ));
    }

    let command = SignInCommand {
        email: request.email,
        password: request.password,
    };

    match state.auth_service.sign_in(command).await {
        Ok(result) => Ok(Json(UserMapper::to_sign_in_response(result))),
        Err(e) => {
            let status = match &e {
                SignInError::UserNotFoundOrInactive => StatusCode::NOT_FOUND,
                SignInError::InvalidPassword => StatusCode::UNAUTHORIZED,
                SignInError::DuplicateAccounts | SignInError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                error!("Sign in failed: {}", e);
            } else {
                warn!("Sign in rejected: {}", e);
            }
            Err(error_response(status, e.user_message(), e.code()))
        }
    }
}

pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SignOutResponse>, ApiError> {
    info!("POST /api/auth/sign-out");

    if let Some(token) = session_token(&headers) {
        if let Err(e) = state.auth_service.sign_out(&token).await {
            error!("Failed to sign out: {}", e);
            return Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Sign out failed",
                "SIGN_OUT_FAILED",
            ));
        }
    }

    Ok(Json(SignOutResponse {
        success_message: "Signed out".to_string(),
    }))
}

pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, ApiError> {
    info!("GET /api/auth/session");

    match super::current_session(&state, &headers).await? {
        Some(session) => Ok(Json(UserMapper::to_session_response(&session))),
        None => Err(error_response(
            StatusCode::UNAUTHORIZED,
            "No active session",
            "UNAUTHENTICATED",
        )),
    }
}
