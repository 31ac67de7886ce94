//! # Storage Traits
//!
//! Storage abstraction for the three record kinds plus sign-in sessions.
//! The domain layer only talks to these traits, so the CSV implementation
//! can be replaced without touching the services.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::countdown::DomainCountdown;
use crate::domain::models::message::DomainMessage;
use crate::domain::models::session::DomainSession;
use crate::domain::models::user::DomainUser;

/// Equality filter for user lookups. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl UserFilter {
    pub fn matches(&self, user: &DomainUser) -> bool {
        self.email.as_ref().map_or(true, |email| &user.email == email)
            && self.is_active.map_or(true, |active| user.is_active == active)
    }
}

/// Who is reading from the message store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// Signed-in session: every record is readable
    Owner,
    /// Anonymous caller: only unlocked records are readable
    Public,
}

impl Viewer {
    pub fn can_read(&self, message: &DomainMessage) -> bool {
        match self {
            Viewer::Owner => true,
            Viewer::Public => message.is_unlocked,
        }
    }
}

#[async_trait]
pub trait UserStorage: Send + Sync {
    /// List users matching the filter, in storage order
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<DomainUser>>;

    /// Store a new user
    async fn store_user(&self, user: &DomainUser) -> Result<()>;
}

#[async_trait]
pub trait MessageStorage: Send + Sync {
    /// List every message readable by `viewer`, in storage order
    async fn list_messages(&self, viewer: Viewer) -> Result<Vec<DomainMessage>>;

    /// Retrieve a message by ID regardless of its lock state
    async fn get_message(&self, message_id: &str) -> Result<Option<DomainMessage>>;

    /// Store a new message
    async fn store_message(&self, message: &DomainMessage) -> Result<()>;

    /// Replace an existing message.
    /// Returns false if no message with that ID exists.
    async fn update_message(&self, message: &DomainMessage) -> Result<bool>;
}

#[async_trait]
pub trait CountdownStorage: Send + Sync {
    /// List all countdown records, in storage order
    async fn list_countdowns(&self) -> Result<Vec<DomainCountdown>>;

    /// Store a new countdown record
    async fn create_countdown(&self, countdown: &DomainCountdown) -> Result<()>;
}

#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn store_session(&self, session: &DomainSession) -> Result<()>;

    async fn get_session(&self, token: &str) -> Result<Option<DomainSession>>;

    /// Returns true if a session was removed
    async fn delete_session(&self, token: &str) -> Result<bool>;
}
