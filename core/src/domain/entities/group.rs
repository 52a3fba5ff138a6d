//! Group and group membership entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of members a group may hold
pub const MAX_GROUP_MEMBERS: i64 = 25;

/// Maximum number of admins a group may hold
pub const MAX_GROUP_ADMINS: i64 = 2;

/// A message group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub group_name: String,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Creates a new group with a fresh ID
    pub fn new(group_name: impl Into<String>, creator_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_name: group_name.into(),
            creator_id,
            created_at: Utc::now(),
        }
    }
}

/// A group membership row, joined with the member's username for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub group_id: Uuid,
    pub member_id: Uuid,
    pub username: String,
    pub is_admin: bool,
    pub joined_at: DateTime<Utc>,
}
