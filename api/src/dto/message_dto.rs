//! Messaging request/response payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use courier_core::domain::Message;
use courier_core::services::SendMessage;

/// Payload for `POST /api/v1/messages`.
///
/// Exactly one of `receiver_id` or `group_id` must be set; the service
/// layer rejects payloads with both or neither.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub receiver_id: Option<Uuid>,

    pub group_id: Option<Uuid>,

    #[validate(length(min = 1, max = 4096, message = "Content must be 1-4096 characters"))]
    pub content: String,
}

impl From<SendMessageRequest> for SendMessage {
    fn from(req: SendMessageRequest) -> Self {
        SendMessage {
            receiver_id: req.receiver_id,
            group_id: req.group_id,
            content: req.content,
        }
    }
}

/// A single message as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: Uuid,
    pub sender_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Whether this message was posted in a group
    pub is_group: bool,
}

impl From<Message> for MessageDto {
    fn from(message: Message) -> Self {
        let is_group = message.is_group();
        Self {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            group_id: message.group_id,
            content: message.content,
            created_at: message.created_at,
            is_group,
        }
    }
}

/// Envelope for message listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageDto>,
}

impl MessagesResponse {
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: messages.into_iter().map(MessageDto::from).collect(),
        }
    }
}
