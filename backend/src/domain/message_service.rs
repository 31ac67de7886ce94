//! Message visibility and administration.
//!
//! The storage layer decides which records a viewer may read. This service
//! orders them by age and reduces every locked record to a card that only
//! carries its title, age and unlock date.

use anyhow::Result;
use chrono::Utc;
use shared::MessageCard;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use crate::domain::commands::messages::{CreateMessageCommand, MessageResult, SetUnlockedCommand};
use crate::domain::models::message::{parse_unlock_date, DomainMessage, MessageValidationError};
use crate::storage::csv::{CsvConnection, MessageRepository};
use crate::storage::{MessageStorage, Viewer};

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error(transparent)]
    Validation(#[from] MessageValidationError),
    #[error("Message {0} not found")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Reduce a message to what the dashboard may show
pub fn visible_card(message: DomainMessage) -> MessageCard {
    if message.is_unlocked {
        MessageCard::Unlocked {
            id: message.id,
            age: message.age,
            title: message.title,
            content: message.content,
            video_url: message.video_url,
            from_family_member: message.from_family_member,
        }
    } else {
        MessageCard::Locked {
            id: message.id,
            age: message.age,
            title: message.title,
            unlock_date: message.unlock_date.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Clone)]
pub struct MessageService {
    message_storage: Arc<dyn MessageStorage>,
}

impl MessageService {
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self::with_storage(Arc::new(MessageRepository::new((*csv_conn).clone())))
    }

    pub fn with_storage(message_storage: Arc<dyn MessageStorage>) -> Self {
        Self { message_storage }
    }

    /// Cards readable by `viewer`, ordered by ascending age. Messages with
    /// the same age keep their storage order.
    pub async fn list_message_cards(&self, viewer: Viewer) -> Result<Vec<MessageCard>> {
        let mut messages = self.message_storage.list_messages(viewer).await?;
        messages.sort_by_key(|message| message.age);

        Ok(messages.into_iter().map(visible_card).collect())
    }

    pub async fn create_message(
        &self,
        command: CreateMessageCommand,
    ) -> Result<MessageResult, MessageError> {
        info!("Creating message for age {}", command.age);

        if command.title.trim().is_empty() {
            return Err(MessageValidationError::EmptyTitle.into());
        }
        if command.content.trim().is_empty() {
            return Err(MessageValidationError::EmptyContent.into());
        }
        if command.from_family_member.trim().is_empty() {
            return Err(MessageValidationError::EmptySender.into());
        }
        let unlock_date = parse_unlock_date(&command.unlock_date)
            .map_err(|_| MessageValidationError::InvalidUnlockDate(command.unlock_date.clone()))?;

        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(anyhow::Error::from)?
            .as_millis() as u64;

        let message = DomainMessage {
            id: shared::BirthdayMessage::generate_id(now_millis),
            age: command.age,
            title: command.title.trim().to_string(),
            content: command.content,
            video_url: command.video_url.filter(|url| !url.trim().is_empty()),
            from_family_member: command.from_family_member.trim().to_string(),
            is_unlocked: command.is_unlocked,
            unlock_date,
            created_at: Utc::now(),
        };
        self.message_storage.store_message(&message).await?;

        Ok(MessageResult {
            success_message: format!("Message for birthday {} saved", message.age),
            message,
        })
    }

    pub async fn set_unlocked(
        &self,
        command: SetUnlockedCommand,
    ) -> Result<MessageResult, MessageError> {
        let Some(mut message) = self.message_storage.get_message(&command.message_id).await? else {
            warn!("Cannot change lock state of unknown message {}", command.message_id);
            return Err(MessageError::NotFound(command.message_id));
        };

        message.is_unlocked = command.is_unlocked;
        if !self.message_storage.update_message(&message).await? {
            return Err(MessageError::NotFound(command.message_id));
        }

        let state = if message.is_unlocked { "unlocked" } else { "locked" };
        Ok(MessageResult {
            success_message: format!("Message for birthday {} {}", message.age, state),
            message,
        })
    }
}
