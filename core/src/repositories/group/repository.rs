//! Group repository trait for group and membership persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::group::{Group, GroupMember};
use crate::errors::DomainError;

/// Repository trait for Group entity and membership operations
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Persist a new group and add its creator as the first admin member.
    /// Both writes happen atomically in the SQL implementation.
    async fn create(&self, group: Group) -> Result<Group, DomainError>;

    /// Check whether a group with the given ID exists
    async fn exists(&self, group_id: Uuid) -> Result<bool, DomainError>;

    /// Check whether a user is a member of a group
    async fn is_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, DomainError>;

    /// Check whether a user is an admin of a group.
    /// Returns `Ok(false)` for non-members.
    async fn is_admin(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, DomainError>;

    /// Number of members in a group
    async fn member_count(&self, group_id: Uuid) -> Result<i64, DomainError>;

    /// Number of admins in a group
    async fn admin_count(&self, group_id: Uuid) -> Result<i64, DomainError>;

    /// Add a member to a group
    async fn add_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        is_admin: bool,
    ) -> Result<(), DomainError>;

    /// Groups the user belongs to, newest first
    async fn find_by_member(&self, user_id: Uuid) -> Result<Vec<Group>, DomainError>;

    /// Members of a group with usernames, admins first then by join time
    async fn find_members(&self, group_id: Uuid) -> Result<Vec<GroupMember>, DomainError>;
}
