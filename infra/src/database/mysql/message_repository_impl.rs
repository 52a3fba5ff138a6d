//! MySQL implementation of the MessageRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use courier_core::domain::entities::message::Message;
use courier_core::errors::DomainError;
use courier_core::repositories::MessageRepository;

use super::db_error;

/// MySQL implementation of MessageRepository
pub struct MySqlMessageRepository {
    pool: MySqlPool,
}

impl MySqlMessageRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_message(row: &sqlx::mysql::MySqlRow) -> Result<Message, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| db_error("Failed to get id", e))?;
        let sender_id: String = row
            .try_get("sender_id")
            .map_err(|e| db_error("Failed to get sender_id", e))?;
        let receiver_id: Option<String> = row
            .try_get("receiver_id")
            .map_err(|e| db_error("Failed to get receiver_id", e))?;
        let group_id: Option<String> = row
            .try_get("group_id")
            .map_err(|e| db_error("Failed to get group_id", e))?;

        Ok(Message {
            id: parse_uuid(&id)?,
            sender_id: parse_uuid(&sender_id)?,
            receiver_id: receiver_id.as_deref().map(parse_uuid).transpose()?,
            group_id: group_id.as_deref().map(parse_uuid).transpose()?,
            content: row
                .try_get("content")
                .map_err(|e| db_error("Failed to get content", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("Failed to get created_at", e))?,
        })
    }
}

fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in message row: {e}"),
    })
}

#[async_trait]
impl MessageRepository for MySqlMessageRepository {
    async fn save(&self, message: Message) -> Result<Message, DomainError> {
        let query = r#"
            INSERT INTO messages (id, sender_id, receiver_id, group_id, content, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(message.id.to_string())
            .bind(message.sender_id.to_string())
            .bind(message.receiver_id.map(|id| id.to_string()))
            .bind(message.group_id.map(|id| id.to_string()))
            .bind(&message.content)
            .bind(message.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to save message", e))?;

        Ok(message)
    }

    async fn find_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<Message>, DomainError> {
        let query = r#"
            SELECT m.id, m.sender_id, m.receiver_id, m.group_id, m.content, m.created_at
            FROM messages m
            WHERE m.sender_id = ?
               OR m.receiver_id = ?
               OR (m.group_id IS NOT NULL AND m.group_id IN (
                   SELECT group_id FROM group_members WHERE member_id = ?
               ))
            ORDER BY m.created_at DESC
            LIMIT ?
        "#;

        let user = user_id.to_string();
        let rows = sqlx::query(query)
            .bind(&user)
            .bind(&user)
            .bind(&user)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to retrieve messages", e))?;

        rows.iter().map(Self::row_to_message).collect()
    }

    async fn find_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, DomainError> {
        let query = r#"
            SELECT m.id, m.sender_id, m.receiver_id, m.group_id, m.content, m.created_at
            FROM messages m
            WHERE m.group_id IS NULL AND (
                (m.sender_id = ? AND m.receiver_id = ?) OR
                (m.sender_id = ? AND m.receiver_id = ?)
            )
            ORDER BY m.created_at ASC
            LIMIT ?
        "#;

        let a = user_id.to_string();
        let b = other_user_id.to_string();
        let rows = sqlx::query(query)
            .bind(&a)
            .bind(&b)
            .bind(&b)
            .bind(&a)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to retrieve conversation", e))?;

        rows.iter().map(Self::row_to_message).collect()
    }

    async fn find_for_group(
        &self,
        group_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, DomainError> {
        let query = r#"
            SELECT m.id, m.sender_id, m.receiver_id, m.group_id, m.content, m.created_at
            FROM messages m
            WHERE m.group_id = ?
            ORDER BY m.created_at DESC
            LIMIT ?
        "#;

        let rows = sqlx::query(query)
            .bind(group_id.to_string())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to retrieve group messages", e))?;

        rows.iter().map(Self::row_to_message).collect()
    }
}
