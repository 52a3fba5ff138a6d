//! Group management

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::entities::group::{Group, GroupMember, MAX_GROUP_ADMINS, MAX_GROUP_MEMBERS};
use crate::errors::DomainError;
use crate::repositories::{GroupRepository, UserRepository};

/// Service managing groups and their memberships
pub struct GroupService<G, U>
where
    G: GroupRepository,
    U: UserRepository,
{
    groups: Arc<G>,
    users: Arc<U>,
}

impl<G, U> GroupService<G, U>
where
    G: GroupRepository,
    U: UserRepository,
{
    pub fn new(groups: Arc<G>, users: Arc<U>) -> Self {
        Self { groups, users }
    }

    /// Creates a group; the creator joins as its first admin.
    pub async fn create(&self, group_name: &str, creator_id: Uuid) -> Result<Group, DomainError> {
        let group = self.groups.create(Group::new(group_name, creator_id)).await?;
        info!("Group {} created by {}", group.id, creator_id);
        Ok(group)
    }

    /// Adds a member to a group on behalf of an admin.
    pub async fn add_member(
        &self,
        group_id: Uuid,
        requester_id: Uuid,
        member_id: Uuid,
        is_admin: bool,
    ) -> Result<(), DomainError> {
        if !self.groups.is_admin(group_id, requester_id).await? {
            return Err(DomainError::Forbidden {
                message: "Only admins can add members to the group".to_string(),
            });
        }
        if !self.users.exists(member_id).await? {
            return Err(DomainError::validation("User does not exist"));
        }
        if self.groups.is_member(group_id, member_id).await? {
            return Err(DomainError::Conflict {
                message: "User is already a member of this group".to_string(),
            });
        }
        if self.groups.member_count(group_id).await? >= MAX_GROUP_MEMBERS {
            return Err(DomainError::validation(format!(
                "Group has reached maximum member limit of {MAX_GROUP_MEMBERS}"
            )));
        }
        if is_admin && self.groups.admin_count(group_id).await? >= MAX_GROUP_ADMINS {
            return Err(DomainError::validation(format!(
                "Group has reached maximum admin limit of {MAX_GROUP_ADMINS}"
            )));
        }

        self.groups.add_member(group_id, member_id, is_admin).await?;
        info!("User {} added to group {}", member_id, group_id);
        Ok(())
    }

    /// Groups the user belongs to
    pub async fn groups_for(&self, user_id: Uuid) -> Result<Vec<Group>, DomainError> {
        self.groups.find_by_member(user_id).await
    }

    /// Members of a group; the caller must be a member
    pub async fn members(
        &self,
        group_id: Uuid,
        requester_id: Uuid,
    ) -> Result<Vec<GroupMember>, DomainError> {
        if !self.groups.is_member(group_id, requester_id).await? {
            return Err(DomainError::Forbidden {
                message: "You are not a member of this group".to_string(),
            });
        }
        self.groups.find_members(group_id).await
    }
}
