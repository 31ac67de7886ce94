//! backend/src/io/rest/mappers/user_mapper.rs

use crate::domain::commands::auth::SignInResult;
use crate::domain::models::session::DomainSession;
use crate::domain::models::user::DomainUser;
use shared::{Session, SessionResponse, SignInResponse, User};

/// Mapper from domain users and sessions to the public DTOs.
/// The stored password is dropped here and never serialized.
pub struct UserMapper;

impl UserMapper {
    pub fn to_dto(domain: DomainUser) -> User {
        User {
            id: domain.id,
            email: domain.email,
            name: domain.name,
            role: domain.role,
            is_active: domain.is_active,
        }
    }

    /// A session only exists for a user that was active at sign-in
    pub fn session_user(session: &DomainSession) -> User {
        User {
            id: session.user_id.clone(),
            email: session.email.clone(),
            name: session.name.clone(),
            role: session.role,
            is_active: true,
        }
    }

    pub fn to_sign_in_response(result: SignInResult) -> SignInResponse {
        SignInResponse {
            session: Session {
                token: result.session.token,
                user: Self::to_dto(result.user),
            },
            success_message: result.success_message,
        }
    }

    pub fn to_session_response(session: &DomainSession) -> SessionResponse {
        SessionResponse {
            user: Self::session_user(session),
        }
    }
}
