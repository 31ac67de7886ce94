//! # Frontend Log Bridge
//!
//! `POST /api/logs` replays log lines from the browser into the backend's
//! tracing output, tagged with the sending component.

use axum::{http::StatusCode, response::Json, routing::post, Router};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::AppState;
use shared::LogEntry;

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub success: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

pub async fn log_message(Json(entry): Json<LogEntry>) -> Result<Json<LogResponse>, StatusCode> {
    let component = entry.component.as_deref().unwrap_or("frontend");

    match entry.level.to_lowercase().as_str() {
        "debug" => debug!(target: "frontend", component, "{}", entry.message),
        "warn" => warn!(target: "frontend", component, "{}", entry.message),
        "error" => error!(target: "frontend", component, "{}", entry.message),
        _ => info!(target: "frontend", component, "{}", entry.message),
    }

    Ok(Json(LogResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{json_request, read_json, test_state};
    use crate::storage::csv::test_utils::TestEnvironment;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_log_accepts_any_level() {
        let env = TestEnvironment::new().unwrap();
        let app = router().with_state(test_state(&env));

        for level in ["info", "ERROR", "trace-ish"] {
            let body = json!({ "level": level, "message": "hello", "component": "dashboard" });
            let response = app
                .clone()
                .oneshot(json_request("POST", "/", None, body.to_string()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body: Value = read_json(response).await;
            assert_eq!(body["success"], true);
        }
    }
}
