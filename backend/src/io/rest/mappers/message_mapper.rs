//! backend/src/io/rest/mappers/message_mapper.rs

use crate::domain::commands::messages::{CreateMessageCommand, MessageResult};
use crate::domain::models::message::DomainMessage;
use shared::{BirthdayMessage, CreateMessageRequest, MessageCard, MessageListResponse, MessageResponse};

pub struct MessageMapper;

impl MessageMapper {
    pub fn to_dto(domain: DomainMessage) -> BirthdayMessage {
        BirthdayMessage {
            id: domain.id,
            age: domain.age,
            title: domain.title,
            content: domain.content,
            video_url: domain.video_url,
            from_family_member: domain.from_family_member,
            is_unlocked: domain.is_unlocked,
            unlock_date: domain.unlock_date.format("%Y-%m-%d").to_string(),
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(request: CreateMessageRequest) -> CreateMessageCommand {
        CreateMessageCommand {
            age: request.age,
            title: request.title,
            content: request.content,
            video_url: request.video_url,
            from_family_member: request.from_family_member,
            unlock_date: request.unlock_date,
            is_unlocked: request.is_unlocked,
        }
    }

    pub fn to_message_response(result: MessageResult) -> MessageResponse {
        MessageResponse {
            message: Self::to_dto(result.message),
            success_message: result.success_message,
        }
    }

    pub fn to_list_response(cards: Vec<MessageCard>) -> MessageListResponse {
        MessageListResponse { messages: cards }
    }
}
