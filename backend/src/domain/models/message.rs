//! backend/src/domain/models/message.rs

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Domain model of a birthday message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainMessage {
    pub id: String,
    pub age: u32,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub from_family_member: String,
    pub is_unlocked: bool,
    pub unlock_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Parse an unlock date given either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp (only the calendar date is kept)
pub fn parse_unlock_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    let timestamp = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid unlock date '{}': expected YYYY-MM-DD or RFC 3339", value))?;
    Ok(timestamp.date_naive())
}

#[derive(Debug, thiserror::Error)]
pub enum MessageValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Content cannot be empty")]
    EmptyContent,
    #[error("Sender cannot be empty")]
    EmptySender,
    #[error("Invalid unlock date: {0}")]
    InvalidUnlockDate(String),
}
