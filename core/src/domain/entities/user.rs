//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Unique username used for login
    pub username: String,

    /// Mobile number supplied at registration
    pub mobile_no: String,

    /// bcrypt hash of the user's password; never the plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh ID
    pub fn new(
        username: impl Into<String>,
        mobile_no: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            mobile_no: mobile_no.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}
