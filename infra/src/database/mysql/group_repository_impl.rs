//! MySQL implementation of the GroupRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use courier_core::domain::entities::group::{Group, GroupMember};
use courier_core::errors::DomainError;
use courier_core::repositories::GroupRepository;

use super::db_error;

/// MySQL implementation of GroupRepository
pub struct MySqlGroupRepository {
    pool: MySqlPool,
}

impl MySqlGroupRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_group(row: &sqlx::mysql::MySqlRow) -> Result<Group, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| db_error("Failed to get id", e))?;
        let creator_id: String = row
            .try_get("creator_id")
            .map_err(|e| db_error("Failed to get creator_id", e))?;

        Ok(Group {
            id: parse_uuid(&id)?,
            group_name: row
                .try_get("group_name")
                .map_err(|e| db_error("Failed to get group_name", e))?,
            creator_id: parse_uuid(&creator_id)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("Failed to get created_at", e))?,
        })
    }

    async fn count(&self, query: &str, group_id: Uuid) -> Result<i64, DomainError> {
        let row = sqlx::query(query)
            .bind(group_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count group members", e))?;

        row.try_get("total")
            .map_err(|e| db_error("Failed to get count result", e))
    }
}

fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in group row: {e}"),
    })
}

#[async_trait]
impl GroupRepository for MySqlGroupRepository {
    async fn create(&self, group: Group) -> Result<Group, DomainError> {
        // Group row and creator membership land together or not at all.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        sqlx::query("INSERT INTO `groups` (id, group_name, creator_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(group.id.to_string())
            .bind(&group.group_name)
            .bind(group.creator_id.to_string())
            .bind(group.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to create group", e))?;

        sqlx::query(
            "INSERT INTO group_members (group_id, member_id, is_admin, joined_at) VALUES (?, ?, true, ?)",
        )
        .bind(group.id.to_string())
        .bind(group.creator_id.to_string())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to add creator as admin", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit group creation", e))?;

        Ok(group)
    }

    async fn exists(&self, group_id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM `groups` WHERE id = ?) AS present")
            .bind(group_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check group existence", e))?;

        let present: i8 = row
            .try_get("present")
            .map_err(|e| db_error("Failed to get existence result", e))?;
        Ok(present == 1)
    }

    async fn is_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM group_members WHERE group_id = ? AND member_id = ?) AS present",
        )
        .bind(group_id.to_string())
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check membership", e))?;

        let present: i8 = row
            .try_get("present")
            .map_err(|e| db_error("Failed to get membership result", e))?;
        Ok(present == 1)
    }

    async fn is_admin(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT is_admin FROM group_members WHERE group_id = ? AND member_id = ?",
        )
        .bind(group_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check admin status", e))?;

        match row {
            Some(row) => row
                .try_get("is_admin")
                .map_err(|e| db_error("Failed to get admin flag", e)),
            None => Ok(false),
        }
    }

    async fn member_count(&self, group_id: Uuid) -> Result<i64, DomainError> {
        self.count(
            "SELECT COUNT(*) AS total FROM group_members WHERE group_id = ?",
            group_id,
        )
        .await
    }

    async fn admin_count(&self, group_id: Uuid) -> Result<i64, DomainError> {
        self.count(
            "SELECT COUNT(*) AS total FROM group_members WHERE group_id = ? AND is_admin = true",
            group_id,
        )
        .await
    }

    async fn add_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        is_admin: bool,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO group_members (group_id, member_id, is_admin, joined_at) VALUES (?, ?, ?, ?)",
        )
        .bind(group_id.to_string())
        .bind(user_id.to_string())
        .bind(is_admin)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to add member to group", e))?;

        Ok(())
    }

    async fn find_by_member(&self, user_id: Uuid) -> Result<Vec<Group>, DomainError> {
        let query = r#"
            SELECT g.id, g.group_name, g.creator_id, g.created_at
            FROM `groups` g
            INNER JOIN group_members gm ON g.id = gm.group_id
            WHERE gm.member_id = ?
            ORDER BY g.created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to retrieve groups", e))?;

        rows.iter().map(Self::row_to_group).collect()
    }

    async fn find_members(&self, group_id: Uuid) -> Result<Vec<GroupMember>, DomainError> {
        let query = r#"
            SELECT gm.group_id, gm.member_id, gm.is_admin, gm.joined_at, u.username
            FROM group_members gm
            INNER JOIN users u ON gm.member_id = u.id
            WHERE gm.group_id = ?
            ORDER BY gm.is_admin DESC, gm.joined_at ASC
        "#;

        let rows = sqlx::query(query)
            .bind(group_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to retrieve group members", e))?;

        rows.iter()
            .map(|row| {
                let group_id: String = row
                    .try_get("group_id")
                    .map_err(|e| db_error("Failed to get group_id", e))?;
                let member_id: String = row
                    .try_get("member_id")
                    .map_err(|e| db_error("Failed to get member_id", e))?;

                Ok(GroupMember {
                    group_id: parse_uuid(&group_id)?,
                    member_id: parse_uuid(&member_id)?,
                    username: row
                        .try_get("username")
                        .map_err(|e| db_error("Failed to get username", e))?,
                    is_admin: row
                        .try_get("is_admin")
                        .map_err(|e| db_error("Failed to get is_admin", e))?,
                    joined_at: row
                        .try_get::<DateTime<Utc>, _>("joined_at")
                        .map_err(|e| db_error("Failed to get joined_at", e))?,
                })
            })
            .collect()
    }
}
