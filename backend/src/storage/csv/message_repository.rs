//! # CSV Message Repository
//!
//! Birthday messages live in `messages.csv`, in insertion order. The read
//! rule of the store is applied here: owners read everything, public
//! callers only read unlocked messages.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::connection::{CsvConnection, RowEdit};
use crate::domain::models::message::{parse_unlock_date, DomainMessage};
use crate::storage::traits::{MessageStorage, Viewer};

const MESSAGES_FILE: &str = "messages.csv";
const MESSAGES_HEADER: &str =
    "id,age,title,content,video_url,from_family_member,is_unlocked,unlock_date,created_at";

/// CSV record structure for messages
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageRecord {
    id: String,
    age: u32,
    title: String,
    content: String,
    video_url: Option<String>,
    from_family_member: String,
    /// Empty means locked
    is_unlocked: Option<bool>,
    unlock_date: String,
    created_at: String,
}

impl From<&DomainMessage> for MessageRecord {
    fn from(message: &DomainMessage) -> Self {
        MessageRecord {
            id: message.id.clone(),
            age: message.age,
            title: message.title.clone(),
            content: message.content.clone(),
            video_url: message.video_url.clone(),
            from_family_member: message.from_family_member.clone(),
            is_unlocked: Some(message.is_unlocked),
            unlock_date: message.unlock_date.format("%Y-%m-%d").to_string(),
            created_at: message.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl TryFrom<MessageRecord> for DomainMessage {
    type Error = anyhow::Error;

    fn try_from(record: MessageRecord) -> Result<Self> {
        let unlock_date: NaiveDate = parse_unlock_date(&record.unlock_date)?;
        let created_at = DateTime::parse_from_rfc3339(&record.created_at)
            .context("Failed to parse created_at")?
            .with_timezone(&Utc);

        Ok(DomainMessage {
            id: record.id,
            age: record.age,
            title: record.title,
            content: record.content,
            video_url: record.video_url.filter(|url| !url.trim().is_empty()),
            from_family_member: record.from_family_member,
            is_unlocked: record.is_unlocked.unwrap_or(false),
            unlock_date,
            created_at,
        })
    }
}

#[derive(Clone)]
pub struct MessageRepository {
    connection: CsvConnection,
}

impl MessageRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_messages(&self) -> Result<Vec<DomainMessage>> {
        let records: Vec<MessageRecord> =
            self.connection.read_records(MESSAGES_FILE, MESSAGES_HEADER)?;

        let mut messages = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id.clone();
            match DomainMessage::try_from(record) {
                Ok(message) => messages.push(message),
                Err(e) => warn!("Skipping message record {}: {}", id, e),
            }
        }
        Ok(messages)
    }
}

#[async_trait]
impl MessageStorage for MessageRepository {
    async fn list_messages(&self, viewer: Viewer) -> Result<Vec<DomainMessage>> {
        let messages: Vec<DomainMessage> = self
            .read_messages()?
            .into_iter()
            .filter(|message| viewer.can_read(message))
            .collect();

        debug!("Listed {} messages for {:?}", messages.len(), viewer);
        Ok(messages)
    }

    async fn get_message(&self, message_id: &str) -> Result<Option<DomainMessage>> {
        Ok(self
            .read_messages()?
            .into_iter()
            .find(|message| message.id == message_id))
    }

    async fn store_message(&self, message: &DomainMessage) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        self.connection
            .append_record(MESSAGES_FILE, MESSAGES_HEADER, &MessageRecord::from(message))?;

        info!("Stored message {} for age {}", message.id, message.age);
        Ok(())
    }

    async fn update_message(&self, message: &DomainMessage) -> Result<bool> {
        let _guard = self.connection.lock_writes().await;

        let changed = self
            .connection
            .rewrite_rows(MESSAGES_FILE, MESSAGES_HEADER, |row| {
                if row.get(0) == Some(message.id.as_str()) {
                    RowEdit::Replace(MessageRecord::from(message))
                } else {
                    RowEdit::Keep
                }
            })?;
        if changed == 0 {
            return Ok(false);
        }

        info!("Updated message {} (unlocked: {})", message.id, message.is_unlocked);
        Ok(true)
    }
}
