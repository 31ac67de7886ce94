use serde::{Deserialize, Serialize};
use std::fmt;

/// Role flag carried by every user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// May add messages and toggle their unlock state
    Admin,
    /// Read-only family viewer
    #[default]
    Family,
}

impl UserRole {
    /// Parse the lowercase role name used in storage files and on the wire
    pub fn parse(value: &str) -> Result<Self, UserRoleError> {
        match value.trim() {
            "admin" => Ok(UserRole::Admin),
            "family" => Ok(UserRole::Family),
            other => Err(UserRoleError(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Family => "family",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRoleError(pub String);

impl fmt::Display for UserRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown user role: '{}'", self.0)
    }
}

impl std::error::Error for UserRoleError {}

/// Public view of a user record. The stored password never leaves the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// Authenticated identity snapshot. The frontend persists this value in
/// local storage and presents `token` on every API call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub session: Session,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutResponse {
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: User,
}

/// A pre-written message for a specific birthday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayMessage {
    pub id: String,
    /// Age this message is written for (1, 2, 3, ...)
    pub age: u32,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub from_family_member: String,
    pub is_unlocked: bool,
    /// Birthday the message unlocks on (YYYY-MM-DD or RFC 3339)
    pub unlock_date: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// What the dashboard is allowed to show for one message.
///
/// Locked cards carry only the target age and unlock date; the content,
/// video and sender of a locked message are never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum MessageCard {
    #[serde(rename_all = "camelCase")]
    Unlocked {
        id: String,
        age: u32,
        title: String,
        content: String,
        video_url: Option<String>,
        from_family_member: String,
    },
    #[serde(rename_all = "camelCase")]
    Locked {
        id: String,
        age: u32,
        title: String,
        unlock_date: String,
    },
}

impl MessageCard {
    pub fn id(&self) -> &str {
        match self {
            MessageCard::Unlocked { id, .. } | MessageCard::Locked { id, .. } => id,
        }
    }

    pub fn age(&self) -> u32 {
        match self {
            MessageCard::Unlocked { age, .. } | MessageCard::Locked { age, .. } => *age,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            MessageCard::Unlocked { title, .. } | MessageCard::Locked { title, .. } => title,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, MessageCard::Unlocked { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageListResponse {
    /// Ordered by ascending age
    pub messages: Vec<MessageCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub age: u32,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub from_family_member: String,
    pub unlock_date: String,
    #[serde(default)]
    pub is_unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetUnlockedRequest {
    pub is_unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: BirthdayMessage,
    pub success_message: String,
}

/// Countdown record, synthesized once and never refreshed afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayCountdown {
    pub id: String,
    /// Age on the next birthday, as computed at synthesis time
    pub current_age: u32,
    /// RFC 3339 timestamp of the next birthday at local midnight
    pub next_birthday: String,
    /// Whole days (rounded up) until the next birthday at synthesis time
    pub days_until_birthday: i64,
    /// YYYY-MM-DD
    pub birth_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownResponse {
    pub countdown: BirthdayCountdown,
}

/// Error body returned by every failing API call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

/// Log line forwarded from the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

/// Live countdown breakdown shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeLeft {
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    pub const SECOND_MS: i64 = 1000;
    pub const MINUTE_MS: i64 = 60 * Self::SECOND_MS;
    pub const HOUR_MS: i64 = 60 * Self::MINUTE_MS;
    pub const DAY_MS: i64 = 24 * Self::HOUR_MS;
    /// Average month of 30.44 days, exact in milliseconds
    pub const MONTH_MS: i64 = 2_630_016_000;

    /// Break down the time between `now_ms` and `target_ms` (both epoch millis).
    ///
    /// Returns `None` once the target is reached so the caller keeps showing
    /// its previous value.
    pub fn until(target_ms: i64, now_ms: i64) -> Option<TimeLeft> {
        let diff = target_ms - now_ms;
        if diff <= 0 {
            return None;
        }

        Some(TimeLeft {
            months: diff / Self::MONTH_MS,
            days: (diff % Self::MONTH_MS) / Self::DAY_MS,
            hours: (diff % Self::DAY_MS) / Self::HOUR_MS,
            minutes: (diff % Self::HOUR_MS) / Self::MINUTE_MS,
            seconds: (diff % Self::MINUTE_MS) / Self::SECOND_MS,
        })
    }

    /// Same as [`TimeLeft::until`] with an RFC 3339 target
    pub fn until_rfc3339(target: &str, now_ms: i64) -> Result<Option<TimeLeft>, chrono::ParseError> {
        let target_ms = chrono::DateTime::parse_from_rfc3339(target)?.timestamp_millis();
        Ok(Self::until(target_ms, now_ms))
    }
}

impl User {
    /// Generate a user ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("user::{}", epoch_millis)
    }
}

impl BirthdayMessage {
    /// Generate a message ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("message::{}", epoch_millis)
    }
}

impl BirthdayCountdown {
    /// Generate a countdown ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("countdown::{}", epoch_millis)
    }
}
