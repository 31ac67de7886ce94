//! backend/src/domain/models/countdown.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Domain model of the countdown record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCountdown {
    pub id: String,
    pub current_age: u32,
    pub next_birthday: DateTime<Utc>,
    pub days_until_birthday: i64,
    pub birth_date: NaiveDate,
}
