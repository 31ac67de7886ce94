//! backend/src/domain/models/session.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::UserRole;

/// A signed-in identity. Sessions carry a snapshot of the user taken at
/// sign-in and are never re-validated against the user records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSession {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl DomainSession {
    pub fn generate_token() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
