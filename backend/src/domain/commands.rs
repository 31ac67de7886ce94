// backend/src/domain/commands.rs

//! Domain-level command and result types.
//! Services take these instead of the `shared` DTOs; the REST layer maps
//! requests into commands and domain results back into DTOs.

pub mod auth {
    use crate::domain::models::session::DomainSession;
    use crate::domain::models::user::DomainUser;
    use shared::UserRole;

    /// Credentials submitted by the sign-in form
    #[derive(Debug, Clone)]
    pub struct SignInCommand {
        pub email: String,
        pub password: String,
    }

    /// Result of a successful sign-in
    #[derive(Debug, Clone)]
    pub struct SignInResult {
        pub session: DomainSession,
        pub user: DomainUser,
        pub success_message: String,
    }

    /// Input for seeding a user record
    #[derive(Debug, Clone)]
    pub struct CreateUserCommand {
        pub email: String,
        pub name: String,
        pub password: String,
        pub role: UserRole,
        pub is_active: bool,
        /// Store an Argon2 hash instead of the plaintext password
        pub hash_password: bool,
    }
}

pub mod messages {
    use crate::domain::models::message::DomainMessage;

    #[derive(Debug, Clone)]
    pub struct CreateMessageCommand {
        pub age: u32,
        pub title: String,
        pub content: String,
        pub video_url: Option<String>,
        pub from_family_member: String,
        pub unlock_date: String,
        pub is_unlocked: bool,
    }

    #[derive(Debug, Clone)]
    pub struct SetUnlockedCommand {
        pub message_id: String,
        pub is_unlocked: bool,
    }

    /// Result of creating or updating a message
    #[derive(Debug, Clone)]
    pub struct MessageResult {
        pub message: DomainMessage,
        pub success_message: String,
    }
}
