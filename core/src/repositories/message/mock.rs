//! In-memory implementation of MessageRepository for testing

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::message::Message;
use crate::errors::DomainError;

use super::repository::MessageRepository;

/// Mock message repository backed by a Vec.
///
/// Group memberships are registered explicitly so the feed query can
/// include group traffic the way the SQL implementation's join does.
#[derive(Default)]
pub struct MockMessageRepository {
    messages: Arc<RwLock<Vec<Message>>>,
    memberships: Arc<RwLock<HashSet<(Uuid, Uuid)>>>,
}

impl MockMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `user_id` as a member of `group_id` for feed queries
    pub async fn add_group_membership(&self, group_id: Uuid, user_id: Uuid) {
        self.memberships.write().await.insert((group_id, user_id));
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn save(&self, message: Message) -> Result<Message, DomainError> {
        self.messages.write().await.push(message.clone());
        Ok(message)
    }

    async fn find_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<Message>, DomainError> {
        let messages = self.messages.read().await;
        let memberships = self.memberships.read().await;

        let mut result: Vec<Message> = messages
            .iter()
            .filter(|m| {
                m.sender_id == user_id
                    || m.receiver_id == Some(user_id)
                    || m.group_id
                        .map(|g| memberships.contains(&(g, user_id)))
                        .unwrap_or(false)
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result.truncate(limit as usize);
        Ok(result)
    }

    async fn find_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, DomainError> {
        let messages = self.messages.read().await;

        let mut result: Vec<Message> = messages
            .iter()
            .filter(|m| {
                m.group_id.is_none()
                    && ((m.sender_id == user_id && m.receiver_id == Some(other_user_id))
                        || (m.sender_id == other_user_id && m.receiver_id == Some(user_id)))
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        result.truncate(limit as usize);
        Ok(result)
    }

    async fn find_for_group(
        &self,
        group_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, DomainError> {
        let messages = self.messages.read().await;

        let mut result: Vec<Message> = messages
            .iter()
            .filter(|m| m.group_id == Some(group_id))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result.truncate(limit as usize);
        Ok(result)
    }
}
