//! Group management request/response payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use courier_core::domain::{Group, GroupMember};

/// Payload for `POST /api/v1/groups`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 128, message = "Group name must be 1-128 characters"))]
    pub group_name: String,
}

/// Payload for `POST /api/v1/groups/{group_id}/members`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMemberRequest {
    pub member_id: Uuid,

    /// Whether the new member is added as an admin.
    #[serde(default)]
    pub is_admin: bool,
}

/// A group as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDto {
    pub id: Uuid,
    pub group_name: String,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Group> for GroupDto {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            group_name: group.group_name,
            creator_id: group.creator_id,
            created_at: group.created_at,
        }
    }
}

/// Envelope for group listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupsResponse {
    pub groups: Vec<GroupDto>,
}

impl GroupsResponse {
    pub fn from_groups(groups: Vec<Group>) -> Self {
        Self {
            groups: groups.into_iter().map(GroupDto::from).collect(),
        }
    }
}

/// A group member as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMemberDto {
    pub member_id: Uuid,
    pub username: String,
    pub is_admin: bool,
    pub joined_at: DateTime<Utc>,
}

impl From<GroupMember> for GroupMemberDto {
    fn from(member: GroupMember) -> Self {
        Self {
            member_id: member.member_id,
            username: member.username,
            is_admin: member.is_admin,
            joined_at: member.joined_at,
        }
    }
}

/// Envelope for member listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersResponse {
    pub members: Vec<GroupMemberDto>,
}

impl MembersResponse {
    pub fn from_members(members: Vec<GroupMember>) -> Self {
        Self {
            members: members.into_iter().map(GroupMemberDto::from).collect(),
        }
    }
}
