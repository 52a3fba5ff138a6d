//! Authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{TokenKind, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::UserRepository;
use crate::services::token::{AccessGrant, TokenService};

/// Service handling user registration and the credential/token boundary
pub struct AuthService<U: UserRepository> {
    users: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Registers a new user, storing only the bcrypt hash of the password.
    pub async fn register(
        &self,
        username: &str,
        mobile_no: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|_| DomainError::Auth(AuthError::PasswordHashFailure))?;

        let user = self
            .users
            .create(User::new(username, mobile_no, password_hash))
            .await?;

        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Verifies credentials and issues an access/refresh token pair.
    ///
    /// An unknown username and a wrong password both come back as
    /// `InvalidCredentials`; a caller cannot probe which usernames exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        let matches = bcrypt::verify(password, &user.password_hash)
            .map_err(|_| DomainError::Auth(AuthError::InvalidCredentials))?;
        if !matches {
            warn!("Failed login attempt for user {}", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        self.tokens.issue_pair(user.id, &user.username)
    }

    /// Exchanges a refresh token for a new access token (single use).
    pub fn refresh(&self, refresh_token: &str) -> Result<AccessGrant, DomainError> {
        let (claims, grant) = self.tokens.rotate(refresh_token)?;
        info!("Rotated refresh token for user {}", claims.sub);
        Ok(grant)
    }

    /// Revokes a presented access token.
    pub fn logout(&self, access_token: &str) -> Result<(), DomainError> {
        let claims = self.tokens.revoke_access(access_token)?;
        info!("Logged out user {}", claims.sub);
        Ok(())
    }

    /// Validates a bearer token for a protected request and returns the
    /// authenticated subject and username.
    pub fn authorize(&self, access_token: &str) -> Result<(Uuid, String), DomainError> {
        let claims = self.tokens.validate(access_token, TokenKind::Access)?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(crate::errors::TokenError::Invalid))?;
        Ok((user_id, claims.username))
    }

    /// Looks up the authenticated user's profile
    pub async fn current_user(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "user".to_string(),
            })
    }
}
