use gloo::net::http::Request;
use shared::LogEntry;
use wasm_bindgen_futures::spawn_local;

use super::api::DEFAULT_BASE_URL;

/// Forwards log lines to the backend's `/api/logs` bridge so they show up
/// in the server log next to the request that caused them
pub struct Logger;

impl Logger {
    pub fn info_with_component(component: &str, message: &str) {
        Self::log("info", message, Some(component.to_string()));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log("warn", message, Some(component.to_string()));
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(format!("[{}] {}", component, message));
        Self::log("error", message, Some(component.to_string()));
    }

    fn log(level: &str, message: &str, component: Option<String>) {
        let entry = LogEntry {
            level: level.to_string(),
            message: message.to_string(),
            component,
        };

        spawn_local(async move {
            let url = format!("{}/api/logs", DEFAULT_BASE_URL);
            if let Ok(request) = Request::post(&url).json(&entry) {
                let _ = request.send().await;
            }
        });
    }
}
