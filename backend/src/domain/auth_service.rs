//! Sign-in check and session bookkeeping.
//!
//! A sign-in succeeds iff exactly one active user has the submitted email
//! and its stored password verifies against the submitted one. There is no
//! lockout or attempt counting. A successful sign-in issues a session that
//! lives until an explicit sign-out.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use crate::domain::commands::auth::{CreateUserCommand, SignInCommand, SignInResult};
use crate::domain::models::session::DomainSession;
use crate::domain::models::user::DomainUser;
use crate::domain::password;
use crate::storage::csv::{CsvConnection, SessionRepository, UserRepository};
use crate::storage::{SessionStorage, UserFilter, UserStorage};

pub const GENERIC_SIGN_IN_FAILURE: &str = "Sign in failed. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error("User not found or inactive")]
    UserNotFoundOrInactive,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("More than one active account uses this email")]
    DuplicateAccounts,
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl SignInError {
    /// Message shown to the person signing in
    pub fn user_message(&self) -> &'static str {
        match self {
            SignInError::UserNotFoundOrInactive => "User not found or inactive",
            SignInError::InvalidPassword => "Invalid password",
            SignInError::DuplicateAccounts | SignInError::Storage(_) => GENERIC_SIGN_IN_FAILURE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SignInError::UserNotFoundOrInactive => "USER_NOT_FOUND",
            SignInError::InvalidPassword => "INVALID_PASSWORD",
            SignInError::DuplicateAccounts | SignInError::Storage(_) => "SIGN_IN_FAILED",
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    user_storage: Arc<dyn UserStorage>,
    session_storage: Arc<dyn SessionStorage>,
}

impl AuthService {
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self::with_storage(
            Arc::new(UserRepository::new((*csv_conn).clone())),
            Arc::new(SessionRepository::new((*csv_conn).clone())),
        )
    }

    pub fn with_storage(
        user_storage: Arc<dyn UserStorage>,
        session_storage: Arc<dyn SessionStorage>,
    ) -> Self {
        Self {
            user_storage,
            session_storage,
        }
    }

    pub async fn sign_in(&self, command: SignInCommand) -> Result<SignInResult, SignInError> {
        info!("Sign-in attempt for {}", command.email);

        let filter = UserFilter {
            email: Some(command.email.clone()),
            is_active: Some(true),
        };
        let mut matches = self.user_storage.list_users(&filter).await?;

        let user = match matches.len() {
            0 => {
                warn!("No active user for {}", command.email);
                return Err(SignInError::UserNotFoundOrInactive);
            }
            1 => matches.remove(0),
            count => {
                warn!("{} active users share the email {}", count, command.email);
                return Err(SignInError::DuplicateAccounts);
            }
        };

        if !password::verify_password(&command.password, &user.password)? {
            warn!("Wrong password for {}", user.id);
            return Err(SignInError::InvalidPassword);
        }

        let session = DomainSession {
            token: DomainSession::generate_token(),
            user_id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            created_at: Utc::now(),
        };
        self.session_storage.store_session(&session).await?;

        info!("User {} signed in", user.id);
        Ok(SignInResult {
            success_message: format!("Welcome, {}!", user.name),
            session,
            user,
        })
    }

    /// Remove the session. Returns false if the token was unknown.
    pub async fn sign_out(&self, token: &str) -> Result<bool> {
        let removed = self.session_storage.delete_session(token).await?;
        if removed {
            info!("Session signed out");
        }
        Ok(removed)
    }

    pub async fn get_session(&self, token: &str) -> Result<Option<DomainSession>> {
        if token.is_empty() {
            return Ok(None);
        }
        self.session_storage.get_session(token).await
    }

    pub async fn create_user(&self, command: CreateUserCommand) -> Result<DomainUser> {
        if command.email.trim().is_empty() {
            return Err(anyhow::anyhow!("Email cannot be empty"));
        }
        if command.password.is_empty() {
            return Err(anyhow::anyhow!("Password cannot be empty"));
        }

        let password = if command.hash_password {
            password::hash_password(&command.password)?
        } else {
            command.password
        };

        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let user = DomainUser {
            id: shared::User::generate_id(now_millis),
            email: command.email,
            name: command.name,
            password,
            role: command.role,
            is_active: command.is_active,
        };

        self.user_storage.store_user(&user).await?;
        info!("Created user {} ({}, {})", user.id, user.email, user.role);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{test_user, TestEnvironment};
    use async_trait::async_trait;
    use shared::UserRole;

    async fn setup_with_users(users: &[DomainUser]) -> (AuthService, TestEnvironment) {
        let env = TestEnvironment::new().unwrap();
        let repo = UserRepository::new(env.connection.clone());
        for user in users {
            repo.store_user(user).await.unwrap();
        }
        let service = AuthService::new(Arc::new(env.connection.clone()));
        (service, env)
    }

    fn sign_in_command(email: &str, password: &str) -> SignInCommand {
        SignInCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_success_issues_session() {
        let (service, _env) =
            setup_with_users(&[test_user("user::1", "kid@example.com", "Cake2024", true)]).await;

        let result = service
            .sign_in(sign_in_command("kid@example.com", "Cake2024"))
            .await
            .unwrap();
        assert_eq!(result.user.id, "user::1");
        assert_eq!(result.session.user_id, "user::1");
        assert!(!result.session.token.is_empty());

        let restored = service.get_session(&result.session.token).await.unwrap();
        assert_eq!(restored, Some(result.session));
    }

    #[tokio::test]
    async fn test_inactive_user_is_not_found() {
        let (service, _env) =
            setup_with_users(&[test_user("user::1", "kid@example.com", "Cake2024", false)]).await;

        let err = service
            .sign_in(sign_in_command("kid@example.com", "Cake2024"))
            .await
            .unwrap_err();
        assert!(matches!(err, SignInError::UserNotFoundOrInactive));
        assert_eq!(err.user_message(), "User not found or inactive");
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let (service, _env) =
            setup_with_users(&[test_user("user::1", "kid@example.com", "Cake2024", true)]).await;

        let err = service
            .sign_in(sign_in_command("Kid@example.com", "Cake2024"))
            .await
            .unwrap_err();
        assert!(matches!(err, SignInError::UserNotFoundOrInactive));
    }

    #[tokio::test]
    async fn test_password_is_case_sensitive() {
        let (service, _env) =
            setup_with_users(&[test_user("user::1", "kid@example.com", "Cake2024", true)]).await;

        let err = service
            .sign_in(sign_in_command("kid@example.com", "cake2024"))
            .await
            .unwrap_err();
        assert!(matches!(err, SignInError::InvalidPassword));
        assert_eq!(err.user_message(), "Invalid password");
        assert_eq!(err.code(), "INVALID_PASSWORD");
    }

    #[tokio::test]
    async fn test_duplicate_active_accounts_fail_generically() {
        let (service, _env) = setup_with_users(&[
            test_user("user::1", "kid@example.com", "Cake2024", true),
            test_user("user::2", "kid@example.com", "Cake2024", true),
        ])
        .await;

        let err = service
            .sign_in(sign_in_command("kid@example.com", "Cake2024"))
            .await
            .unwrap_err();
        assert!(matches!(err, SignInError::DuplicateAccounts));
        assert_eq!(err.user_message(), GENERIC_SIGN_IN_FAILURE);
    }

    #[tokio::test]
    async fn test_inactive_duplicate_does_not_block() {
        let (service, _env) = setup_with_users(&[
            test_user("user::1", "kid@example.com", "Old", false),
            test_user("user::2", "kid@example.com", "Cake2024", true),
        ])
        .await;

        let result = service
            .sign_in(sign_in_command("kid@example.com", "Cake2024"))
            .await
            .unwrap();
        assert_eq!(result.user.id, "user::2");
    }

    #[tokio::test]
    async fn test_sign_out_removes_session() {
        let (service, _env) =
            setup_with_users(&[test_user("user::1", "kid@example.com", "Cake2024", true)]).await;
        let result = service
            .sign_in(sign_in_command("kid@example.com", "Cake2024"))
            .await
            .unwrap();

        assert!(service.sign_out(&result.session.token).await.unwrap());
        assert!(!service.sign_out(&result.session.token).await.unwrap());
        assert!(service.get_session(&result.session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_hashed_user_can_sign_in() {
        let (service, env) = setup_with_users(&[]).await;

        let user = service
            .create_user(CreateUserCommand {
                email: "mom@example.com".to_string(),
                name: "Mom".to_string(),
                password: "Balloons".to_string(),
                role: UserRole::Admin,
                is_active: true,
                hash_password: true,
            })
            .await
            .unwrap();
        assert!(password::is_hashed(&user.password));

        let stored = std::fs::read_to_string(env.connection.file_path("users.csv")).unwrap();
        assert!(!stored.contains("Balloons"));

        let result = service
            .sign_in(sign_in_command("mom@example.com", "Balloons"))
            .await
            .unwrap();
        assert!(result.session.is_admin());
    }

    struct FailingUserStorage;

    #[async_trait]
    impl UserStorage for FailingUserStorage {
        async fn list_users(&self, _filter: &UserFilter) -> Result<Vec<DomainUser>> {
            Err(anyhow::anyhow!("disk unavailable"))
        }

        async fn store_user(&self, _user: &DomainUser) -> Result<()> {
            Err(anyhow::anyhow!("disk unavailable"))
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic() {
        let env = TestEnvironment::new().unwrap();
        let service = AuthService::with_storage(
            Arc::new(FailingUserStorage),
            Arc::new(SessionRepository::new(env.connection.clone())),
        );

        let err = service
            .sign_in(sign_in_command("kid@example.com", "Cake2024"))
            .await
            .unwrap_err();
        assert!(matches!(err, SignInError::Storage(_)));
        assert_eq!(err.user_message(), GENERIC_SIGN_IN_FAILURE);
        assert_eq!(err.code(), "SIGN_IN_FAILED");
    }
}
