//! Browser-local persistence of the signed-in session.
//!
//! The snapshot is trusted as-is on startup; it is never re-validated
//! against the backend and never expires.

use gloo::storage::{LocalStorage, Storage};
use shared::Session;

use super::logging::Logger;

pub const SESSION_KEY: &str = "nephewDiariesSession";

pub fn parse_snapshot(raw: &str) -> Option<Session> {
    serde_json::from_str(raw).ok()
}

/// Load the stored session. A snapshot that no longer parses is removed.
pub fn load_session() -> Option<Session> {
    let raw = LocalStorage::raw().get_item(SESSION_KEY).ok().flatten()?;

    match parse_snapshot(&raw) {
        Some(session) => Some(session),
        None => {
            Logger::warn_with_component("session-storage", "Discarding unreadable session snapshot");
            clear_session();
            None
        }
    }
}

pub fn save_session(session: &Session) {
    if let Err(e) = LocalStorage::set(SESSION_KEY, session) {
        Logger::error_with_component("session-storage", &format!("Failed to save session: {}", e));
    }
}

pub fn clear_session() {
    LocalStorage::delete(SESSION_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_parse_snapshot() {
        let raw = r#"{"token":"abc","user":{"id":"user::1","email":"kid@example.com","name":"Kid","role":"family","isActive":true}}"#;
        let session = parse_snapshot(raw).unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.user.name, "Kid");

        assert!(parse_snapshot("{not json").is_none());
        assert!(parse_snapshot(r#"{"token":"abc"}"#).is_none());
    }
}
