//! # REST API for Birthday Messages
//!
//! Any signed-in session reads every message; anonymous callers only get
//! the unlocked ones. Creating messages and toggling their lock state needs
//! an admin session.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, put},
    Router,
};
use tracing::{error, info, warn};

use super::mappers::MessageMapper;
use super::{current_session, error_response, require_admin, ApiError};
use crate::domain::commands::messages::SetUnlockedCommand;
use crate::domain::MessageError;
use crate::storage::Viewer;
use crate::AppState;
use shared::{CreateMessageRequest, MessageListResponse, MessageResponse, SetUnlockedRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_messages).post(create_message))
        .route("/:id/unlock", put(set_unlocked))
}

fn message_error_response(e: MessageError) -> ApiError {
    match e {
        MessageError::Validation(e) => {
            warn!("Rejected message: {}", e);
            error_response(StatusCode::BAD_REQUEST, &e.to_string(), "INVALID_INPUT")
        }
        MessageError::NotFound(id) => {
            warn!("Message {} not found", id);
            error_response(StatusCode::NOT_FOUND, "Message not found", "MESSAGE_NOT_FOUND")
        }
        MessageError::Storage(e) => {
            error!("Message storage failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save message",
                "MESSAGE_SAVE_ERROR",
            )
        }
    }
}

pub async fn list_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageListResponse>, ApiError> {
    let viewer = match current_session(&state, &headers).await? {
        Some(_) => Viewer::Owner,
        None => Viewer::Public,
    };
    info!("GET /api/messages - viewer: {:?}", viewer);

    match state.message_service.list_message_cards(viewer).await {
        Ok(cards) => Ok(Json(MessageMapper::to_list_response(cards))),
        Err(e) => {
            error!("Failed to load messages: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load messages",
                "MESSAGE_LOAD_ERROR",
            ))
        }
    }
}

pub async fn create_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let session = require_admin(&state, &headers).await?;
    info!("POST /api/messages - age {} by {}", request.age, session.user_id);

    let command = MessageMapper::to_create_command(request);
    match state.message_service.create_message(command).await {
        Ok(result) => Ok((
            StatusCode::CREATED,
            Json(MessageMapper::to_message_response(result)),
        )),
        Err(e) => Err(message_error_response(e)),
    }
}

pub async fn set_unlocked(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<SetUnlockedRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let session = require_admin(&state, &headers).await?;
    info!(
        "PUT /api/messages/{}/unlock - unlocked: {} by {}",
        message_id, request.is_unlocked, session.user_id
    );

    let command = SetUnlockedCommand {
        message_id,
        is_unlocked: request.is_unlocked,
    };
    match state.message_service.set_unlocked(command).await {
        Ok(result) => Ok(Json(MessageMapper::to_message_response(result))),
        Err(e) => Err(message_error_response(e)),
    }
}
