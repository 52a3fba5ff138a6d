//! In-memory implementation of GroupRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::group::{Group, GroupMember};
use crate::errors::DomainError;

use super::repository::GroupRepository;

/// Mock group repository backed by HashMaps
#[derive(Default)]
pub struct MockGroupRepository {
    groups: Arc<RwLock<HashMap<Uuid, Group>>>,
    members: Arc<RwLock<Vec<GroupMember>>>,
    usernames: Arc<RwLock<HashMap<Uuid, String>>>,
}

impl MockGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a username for member listings
    pub async fn register_username(&self, user_id: Uuid, username: impl Into<String>) {
        self.usernames.write().await.insert(user_id, username.into());
    }

    async fn username_for(&self, user_id: Uuid) -> String {
        self.usernames
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| user_id.to_string())
    }
}

#[async_trait]
impl GroupRepository for MockGroupRepository {
    async fn create(&self, group: Group) -> Result<Group, DomainError> {
        let creator = GroupMember {
            group_id: group.id,
            member_id: group.creator_id,
            username: self.username_for(group.creator_id).await,
            is_admin: true,
            joined_at: Utc::now(),
        };

        self.groups.write().await.insert(group.id, group.clone());
        self.members.write().await.push(creator);
        Ok(group)
    }

    async fn exists(&self, group_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.groups.read().await.contains_key(&group_id))
    }

    async fn is_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let members = self.members.read().await;
        Ok(members
            .iter()
            .any(|m| m.group_id == group_id && m.member_id == user_id))
    }

    async fn is_admin(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let members = self.members.read().await;
        Ok(members
            .iter()
            .any(|m| m.group_id == group_id && m.member_id == user_id && m.is_admin))
    }

    async fn member_count(&self, group_id: Uuid) -> Result<i64, DomainError> {
        let members = self.members.read().await;
        Ok(members.iter().filter(|m| m.group_id == group_id).count() as i64)
    }

    async fn admin_count(&self, group_id: Uuid) -> Result<i64, DomainError> {
        let members = self.members.read().await;
        Ok(members
            .iter()
            .filter(|m| m.group_id == group_id && m.is_admin)
            .count() as i64)
    }

    async fn add_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        is_admin: bool,
    ) -> Result<(), DomainError> {
        let member = GroupMember {
            group_id,
            member_id: user_id,
            username: self.username_for(user_id).await,
            is_admin,
            joined_at: Utc::now(),
        };
        self.members.write().await.push(member);
        Ok(())
    }

    async fn find_by_member(&self, user_id: Uuid) -> Result<Vec<Group>, DomainError> {
        let members = self.members.read().await;
        let groups = self.groups.read().await;

        let mut result: Vec<Group> = members
            .iter()
            .filter(|m| m.member_id == user_id)
            .filter_map(|m| groups.get(&m.group_id).cloned())
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn find_members(&self, group_id: Uuid) -> Result<Vec<GroupMember>, DomainError> {
        let members = self.members.read().await;

        let mut result: Vec<GroupMember> = members
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            b.is_admin
                .cmp(&a.is_admin)
                .then(a.joined_at.cmp(&b.joined_at))
        });
        Ok(result)
    }
}
