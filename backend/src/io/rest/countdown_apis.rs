//! # REST API for the Birthday Countdown

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::Local;
use tracing::{error, info};

use super::mappers::CountdownMapper;
use super::{error_response, ApiError};
use crate::AppState;
use shared::CountdownResponse;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_countdown))
}

/// Return the stored countdown, synthesizing it in server local time on
/// the first call
pub async fn get_countdown(
    State(state): State<AppState>,
) -> Result<Json<CountdownResponse>, ApiError> {
    info!("GET /api/countdown");

    match state
        .countdown_service
        .load_or_create(Local::now().fixed_offset())
        .await
    {
        Ok(countdown) => Ok(Json(CountdownMapper::to_countdown_response(countdown))),
        Err(e) => {
            error!("Failed to load countdown: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load countdown",
                "COUNTDOWN_ERROR",
            ))
        }
    }
}
