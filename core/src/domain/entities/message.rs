//! Message entity covering both direct and group messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted text message.
///
/// Exactly one of `receiver_id` (direct message) or `group_id` (group
/// message) is set; the repositories enforce this shape at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,

    pub sender_id: Uuid,

    /// Set for direct messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<Uuid>,

    /// Set for group messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,

    pub content: String,

    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new direct message
    pub fn direct(sender_id: Uuid, receiver_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id: Some(receiver_id),
            group_id: None,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Creates a new group message
    pub fn group(sender_id: Uuid, group_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id: None,
            group_id: Some(group_id),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether this message was posted in a group
    pub fn is_group(&self) -> bool {
        self.group_id.is_some()
    }
}
