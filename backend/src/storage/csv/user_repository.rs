//! # CSV User Repository
//!
//! Users live in `users.csv`. Records are created out of band (seeded by
//! hand or with the `seed-user` subcommand) and only read during sign-in.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::UserRole;
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::domain::models::user::DomainUser;
use crate::storage::traits::{UserFilter, UserStorage};

const USERS_FILE: &str = "users.csv";
const USERS_HEADER: &str = "id,email,name,password,role,is_active";

/// CSV record structure for users
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    id: String,
    email: String,
    name: String,
    password: String,
    role: String,
    is_active: bool,
}

impl From<&DomainUser> for UserRecord {
    fn from(user: &DomainUser) -> Self {
        UserRecord {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            password: user.password.clone(),
            role: user.role.as_str().to_string(),
            is_active: user.is_active,
        }
    }
}

impl TryFrom<UserRecord> for DomainUser {
    type Error = anyhow::Error;

    fn try_from(record: UserRecord) -> Result<Self> {
        let role = if record.role.trim().is_empty() {
            UserRole::default()
        } else {
            UserRole::parse(&record.role)?
        };

        Ok(DomainUser {
            id: record.id,
            email: record.email,
            name: record.name,
            password: record.password,
            role,
            is_active: record.is_active,
        })
    }
}

#[derive(Clone)]
pub struct UserRepository {
    connection: CsvConnection,
}

impl UserRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_users(&self) -> Result<Vec<DomainUser>> {
        let records: Vec<UserRecord> = self.connection.read_records(USERS_FILE, USERS_HEADER)?;

        let mut users = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id.clone();
            match DomainUser::try_from(record) {
                Ok(user) => users.push(user),
                Err(e) => warn!("Skipping user record {}: {}", id, e),
            }
        }
        Ok(users)
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<DomainUser>> {
        let users: Vec<DomainUser> = self
            .read_users()?
            .into_iter()
            .filter(|user| filter.matches(user))
            .collect();

        debug!("Found {} users matching {:?}", users.len(), filter);
        Ok(users)
    }

    async fn store_user(&self, user: &DomainUser) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        self.connection
            .append_record(USERS_FILE, USERS_HEADER, &UserRecord::from(user))?;

        info!("Stored user {} ({})", user.id, user.email);
        Ok(())
    }
}
