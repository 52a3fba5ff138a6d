//! Message routing and validation

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::entities::group::{MAX_GROUP_ADMINS, MAX_GROUP_MEMBERS};
use crate::domain::entities::message::Message;
use crate::errors::DomainError;
use crate::repositories::{GroupRepository, MessageRepository, UserRepository};

/// Default number of messages returned by history queries
const HISTORY_LIMIT: i64 = 10;

/// A send request with its target; exactly one of the two targets is set
#[derive(Debug, Clone)]
pub struct SendMessage {
    pub receiver_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub content: String,
}

/// Service validating and persisting direct and group messages
pub struct MessageService<M, G, U>
where
    M: MessageRepository,
    G: GroupRepository,
    U: UserRepository,
{
    messages: Arc<M>,
    groups: Arc<G>,
    users: Arc<U>,
}

impl<M, G, U> MessageService<M, G, U>
where
    M: MessageRepository,
    G: GroupRepository,
    U: UserRepository,
{
    pub fn new(messages: Arc<M>, groups: Arc<G>, users: Arc<U>) -> Self {
        Self {
            messages,
            groups,
            users,
        }
    }

    /// Routes a message to its direct or group target after validation.
    pub async fn send(&self, sender_id: Uuid, request: SendMessage) -> Result<Message, DomainError> {
        match (request.receiver_id, request.group_id) {
            (Some(receiver_id), None) => {
                self.send_direct(sender_id, receiver_id, request.content).await
            }
            (None, Some(group_id)) => self.send_group(sender_id, group_id, request.content).await,
            _ => Err(DomainError::validation(
                "Either receiver_id or group_id must be provided, but not both",
            )),
        }
    }

    async fn send_direct(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<Message, DomainError> {
        if !self.users.exists(receiver_id).await? {
            return Err(DomainError::validation("Receiver user does not exist"));
        }
        if sender_id == receiver_id {
            return Err(DomainError::validation("Cannot send message to yourself"));
        }

        let message = self
            .messages
            .save(Message::direct(sender_id, receiver_id, content))
            .await?;
        info!("Direct message {} sent", message.id);
        Ok(message)
    }

    async fn send_group(
        &self,
        sender_id: Uuid,
        group_id: Uuid,
        content: String,
    ) -> Result<Message, DomainError> {
        if !self.groups.exists(group_id).await? {
            return Err(DomainError::validation("Group does not exist"));
        }
        if !self.groups.is_member(group_id, sender_id).await? {
            return Err(DomainError::Forbidden {
                message: "You are not a member of this group".to_string(),
            });
        }
        self.check_group_constraints(group_id).await?;

        let message = self
            .messages
            .save(Message::group(sender_id, group_id, content))
            .await?;
        info!("Group message {} sent to {}", message.id, group_id);
        Ok(message)
    }

    /// Rejects sends into groups that have drifted past their size limits.
    async fn check_group_constraints(&self, group_id: Uuid) -> Result<(), DomainError> {
        if self.groups.member_count(group_id).await? > MAX_GROUP_MEMBERS {
            return Err(DomainError::validation(format!(
                "Group has exceeded maximum member limit of {MAX_GROUP_MEMBERS}"
            )));
        }
        if self.groups.admin_count(group_id).await? > MAX_GROUP_ADMINS {
            return Err(DomainError::validation(format!(
                "Group has exceeded maximum admin limit of {MAX_GROUP_ADMINS}"
            )));
        }
        Ok(())
    }

    /// Recent messages the user sent, received, or saw in their groups
    pub async fn feed(&self, user_id: Uuid) -> Result<Vec<Message>, DomainError> {
        self.messages.find_for_user(user_id, HISTORY_LIMIT).await
    }

    /// The direct conversation between the user and another user
    pub async fn conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<Vec<Message>, DomainError> {
        self.messages
            .find_conversation(user_id, other_user_id, HISTORY_LIMIT)
            .await
    }

    /// Group history; the caller must be a member
    pub async fn group_history(
        &self,
        user_id: Uuid,
        group_id: Uuid,
    ) -> Result<Vec<Message>, DomainError> {
        if !self.groups.is_member(group_id, user_id).await? {
            return Err(DomainError::Forbidden {
                message: "You are not a member of this group".to_string(),
            });
        }
        self.messages.find_for_group(group_id, HISTORY_LIMIT).await
    }
}
