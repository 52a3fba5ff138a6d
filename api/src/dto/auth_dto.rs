//! Authentication request/response payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use courier_core::domain::TokenPair;

/// Payload for `POST /api/v1/auth/register`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,

    #[validate(length(min = 10, max = 15, message = "Mobile number must be 10-15 digits"))]
    pub mobile_no: String,

    #[validate(length(min = 8, max = 128, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Payload for `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token pair returned by login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

impl From<TokenPair> for AuthResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
        }
    }
}

/// Payload for `POST /api/v1/auth/refresh`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// New access token minted from a refresh token. The refresh token is
/// single-use and no replacement is issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// Profile of the authenticated caller, returned by `GET /api/v1/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub mobile_no: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<courier_core::domain::User> for UserResponse {
    fn from(user: courier_core::domain::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            mobile_no: user.mobile_no,
            created_at: user.created_at,
        }
    }
}
