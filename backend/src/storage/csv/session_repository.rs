//! # CSV Session Repository
//!
//! Sign-in sessions live in `sessions.csv`. Sessions never expire; a row is
//! removed only by an explicit sign-out.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use shared::UserRole;
use tracing::{info, warn};

use super::connection::{CsvConnection, RowEdit};
use crate::domain::models::session::DomainSession;
use crate::storage::traits::SessionStorage;

const SESSIONS_FILE: &str = "sessions.csv";
const SESSIONS_HEADER: &str = "token,user_id,email,name,role,created_at";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    token: String,
    user_id: String,
    email: String,
    name: String,
    role: String,
    created_at: String,
}

impl From<&DomainSession> for SessionRecord {
    fn from(session: &DomainSession) -> Self {
        SessionRecord {
            token: session.token.clone(),
            user_id: session.user_id.clone(),
            email: session.email.clone(),
            name: session.name.clone(),
            role: session.role.as_str().to_string(),
            created_at: session.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl TryFrom<SessionRecord> for DomainSession {
    type Error = anyhow::Error;

    fn try_from(record: SessionRecord) -> Result<Self> {
        Ok(DomainSession {
            role: UserRole::parse(&record.role)?,
            created_at: DateTime::parse_from_rfc3339(&record.created_at)
                .context("Failed to parse created_at")?
                .with_timezone(&Utc),
            token: record.token,
            user_id: record.user_id,
            email: record.email,
            name: record.name,
        })
    }
}

#[derive(Clone)]
pub struct SessionRepository {
    connection: CsvConnection,
}

impl SessionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl SessionStorage for SessionRepository {
    async fn store_session(&self, session: &DomainSession) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        self.connection
            .append_record(SESSIONS_FILE, SESSIONS_HEADER, &SessionRecord::from(session))?;

        info!("Stored session for {}", session.user_id);
        Ok(())
    }

    async fn get_session(&self, token: &str) -> Result<Option<DomainSession>> {
        let records: Vec<SessionRecord> =
            self.connection.read_records(SESSIONS_FILE, SESSIONS_HEADER)?;

        match records.into_iter().find(|record| record.token == token) {
            Some(record) => match DomainSession::try_from(record) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    warn!("Ignoring unreadable session record: {}", e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn delete_session(&self, token: &str) -> Result<bool> {
        let _guard = self.connection.lock_writes().await;

        let removed = self.connection.rewrite_rows::<SessionRecord, _>(
            SESSIONS_FILE,
            SESSIONS_HEADER,
            |row| {
                if row.get(0) == Some(token) {
                    RowEdit::Remove
                } else {
                    RowEdit::Keep
                }
            },
        )?;
        if removed == 0 {
            return Ok(false);
        }

        info!("Deleted {} session row(s)", removed);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{test_session, TestEnvironment};
    use std::fs;

    #[tokio::test]
    async fn test_store_get_delete() {
        let env = TestEnvironment::new().unwrap();
        let repo = SessionRepository::new(env.connection.clone());

        let first = test_session("token-a", UserRole::Family);
        let second = test_session("token-b", UserRole::Admin);
        repo.store_session(&first).await.unwrap();
        repo.store_session(&second).await.unwrap();

        assert_eq!(repo.get_session("token-a").await.unwrap(), Some(first));
        assert_eq!(
            repo.get_session("token-b").await.unwrap().map(|s| s.role),
            Some(UserRole::Admin)
        );
        assert!(repo.get_session("token-c").await.unwrap().is_none());

        assert!(repo.delete_session("token-a").await.unwrap());
        assert!(!repo.delete_session("token-a").await.unwrap());
        assert!(repo.get_session("token-a").await.unwrap().is_none());
        assert!(repo.get_session("token-b").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sign_out_keeps_rows_it_cannot_read() {
        let env = TestEnvironment::new().unwrap();
        let repo = SessionRepository::new(env.connection.clone());
        repo.store_session(&test_session("token-a", UserRole::Family)).await.unwrap();

        let odd_row = "token-b,user::2";
        let path = env.connection.file_path(SESSIONS_FILE);
        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push_str(odd_row);
        contents.push('\n');
        fs::write(&path, contents).unwrap();

        assert!(repo.delete_session("token-a").await.unwrap());

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, format!("{}\n{}\n", SESSIONS_HEADER, odd_row));
    }
}
