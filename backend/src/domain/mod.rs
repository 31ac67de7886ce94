//! # Domain Module
//!
//! Business rules of the birthday time capsule:
//!
//! - **Sign-in**: exactly one active user per email, exact password match,
//!   sessions that last until sign-out (`auth_service`, `password`)
//! - **Messages**: age ordering and the locked/unlocked card reduction, plus
//!   admin-only creation and unlock toggling (`message_service`)
//! - **Countdown**: one-time synthesis of the next-birthday record
//!   (`countdown_service`)
//!
//! Services talk to storage through the traits in `crate::storage` and take
//! the command types in `commands` rather than wire DTOs.

pub mod auth_service;
pub mod commands;
pub mod countdown_service;
pub mod message_service;
pub mod models;
pub mod password;

pub use auth_service::{AuthService, SignInError};
pub use countdown_service::CountdownService;
pub use message_service::{MessageError, MessageService};
