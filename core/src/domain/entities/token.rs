//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of a signed token.
///
/// Kept as a closed enum rather than an open string so that presenting a
/// refresh token where an access token is expected is a typed mismatch,
/// not a string-comparison bug surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential authorizing individual protected requests
    Access,
    /// Long-lived credential exchanged once for a new access token
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Username of the subject
    pub username: String,

    /// Token kind tag
    pub kind: TokenKind,

    /// JWT ID, unique per token; the revocation lookup key
    pub jti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Creates claims for a token of the given kind expiring `ttl` from now.
    ///
    /// Every call generates a fresh `jti`, never reused across tokens even
    /// for the same subject.
    pub fn new(
        user_id: Uuid,
        username: impl Into<String>,
        kind: TokenKind,
        ttl: Duration,
        issuer: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: user_id.to_string(),
            username: username.into(),
            kind,
            jti: generate_token_id(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.into(),
        }
    }

    /// Parses the subject claim back into a user ID
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Absolute expiry of the token
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// An access/refresh token pair as handed out at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Generates a unique token identifier (`jti`).
///
/// Sixteen bytes from the OS randomness source, hex encoded. If the source
/// is unavailable the identifier is derived from the current nanosecond
/// timestamp instead, so issuance never fails outright.
pub fn generate_token_id() -> String {
    let mut bytes = [0u8; 16];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => hex::encode(bytes),
        Err(_) => {
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default();
            format!("{:032x}", nanos)
        }
    }
}
