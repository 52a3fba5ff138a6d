//! Message repository trait for message persistence and retrieval.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::message::Message;
use crate::errors::DomainError;

/// Repository trait for Message entity persistence operations
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a message (direct or group)
    async fn save(&self, message: Message) -> Result<Message, DomainError>;

    /// The most recent messages the user sent, received, or that were
    /// posted in one of the user's groups, newest first.
    async fn find_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<Message>, DomainError>;

    /// The direct-message conversation between two users, oldest first
    async fn find_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, DomainError>;

    /// Messages posted in a group, newest first
    async fn find_for_group(&self, group_id: Uuid, limit: i64)
        -> Result<Vec<Message>, DomainError>;
}
