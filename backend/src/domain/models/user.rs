//! backend/src/domain/models/user.rs

use serde::{Deserialize, Serialize};
use shared::UserRole;

/// Domain model of a user record, including the stored password
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainUser {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Plaintext or an Argon2 PHC string, see `domain::password`
    pub password: String,
    pub role: UserRole,
    pub is_active: bool,
}
