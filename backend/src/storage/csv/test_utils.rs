/// Test utilities shared by the repository, service and REST tests.
///
/// `TestEnvironment` keeps its `TempDir` alive for the duration of a test,
/// so every data file disappears when the environment is dropped.
use anyhow::Result;
use chrono::{NaiveDate, TimeZone, Utc};
use shared::UserRole;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::CsvConnection;
use crate::domain::models::countdown::DomainCountdown;
use crate::domain::models::message::DomainMessage;
use crate::domain::models::session::DomainSession;
use crate::domain::models::user::DomainUser;

pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}

pub fn test_user(id: &str, email: &str, password: &str, is_active: bool) -> DomainUser {
    DomainUser {
        id: id.to_string(),
        email: email.to_string(),
        name: format!("Name of {}", id),
        password: password.to_string(),
        role: UserRole::Family,
        is_active,
    }
}

pub fn test_message(id: &str, age: u32, is_unlocked: bool) -> DomainMessage {
    DomainMessage {
        id: id.to_string(),
        age,
        title: format!("Birthday number {}", age),
        content: format!("Secret words for age {}", age),
        video_url: None,
        from_family_member: "Grandma".to_string(),
        is_unlocked,
        unlock_date: NaiveDate::from_ymd_opt(2024 + age as i32, 2, 20).unwrap(),
        created_at: Utc.with_ymd_and_hms(2024, 12, 1, 10, 0, 0).unwrap(),
    }
}

pub fn test_countdown(id: &str) -> DomainCountdown {
    DomainCountdown {
        id: id.to_string(),
        current_age: 1,
        next_birthday: Utc.with_ymd_and_hms(2025, 2, 20, 0, 0, 0).unwrap(),
        days_until_birthday: 90,
        birth_date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
    }
}

pub fn test_session(token: &str, role: UserRole) -> DomainSession {
    DomainSession {
        token: token.to_string(),
        user_id: format!("user::{}", token),
        email: format!("{}@example.com", token),
        name: "Test".to_string(),
        role,
        created_at: Utc.with_ymd_and_hms(2024, 12, 1, 10, 0, 0).unwrap(),
    }
}
