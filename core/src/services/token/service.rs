//! Main token service implementation

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;
use super::registry::RevocationRegistry;

/// A freshly issued access token, as returned by a rotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGrant {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Service for issuing, validating, rotating, and revoking JWTs.
///
/// Issuance and signature validation are pure and share no mutable state;
/// the injected [`RevocationRegistry`] is the only shared resource.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    registry: Arc<RevocationRegistry>,
}

impl TokenService {
    /// Creates a new token service.
    ///
    /// Fails when the signing secret is missing; nothing downstream can
    /// work without it, so the misconfiguration surfaces at startup.
    pub fn new(
        config: TokenServiceConfig,
        registry: Arc<RevocationRegistry>,
    ) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::internal("JWT signing secret is not configured"));
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        // No clock-skew allowance; expiry comparisons are exact.
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            registry,
        })
    }

    /// The registry this service consults for revocation checks
    pub fn registry(&self) -> &Arc<RevocationRegistry> {
        &self.registry
    }

    /// Access token lifetime in seconds, for response bodies
    pub fn access_token_lifetime(&self) -> i64 {
        self.config.access_token_ttl.num_seconds()
    }

    /// Issues a signed token of the given kind expiring `ttl` from now.
    ///
    /// Pure construction: the registry is never touched here.
    pub fn issue(
        &self,
        user_id: Uuid,
        username: &str,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, username, kind, ttl, &self.config.issuer);
        self.encode(&claims)
    }

    /// Issues the access/refresh pair handed out at login.
    ///
    /// The two tokens carry distinct identifiers and independent lifetimes.
    pub fn issue_pair(&self, user_id: Uuid, username: &str) -> Result<TokenPair, DomainError> {
        let access_token = self.issue(
            user_id,
            username,
            TokenKind::Access,
            self.config.access_token_ttl,
        )?;
        let refresh_token = self.issue(
            user_id,
            username,
            TokenKind::Refresh,
            self.config.refresh_token_ttl,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_token_lifetime(),
        })
    }

    /// Validates a presented token against an expected kind.
    ///
    /// Four ordered checks, each a distinct rejection: signature and
    /// structure, expiry, kind, revocation. Any failure yields no usable
    /// identity; callers collapse all four into one unauthorized outcome.
    pub fn validate(&self, token: &str, expected_kind: TokenKind) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Token(TokenError::Expired)
                }
                _ => DomainError::Token(TokenError::Invalid),
            }
        })?;
        let claims = data.claims;

        // jsonwebtoken treats exp == now as still live for the remainder of
        // the second; the contract here is that a token is dead the moment
        // its expiry timestamp is reached.
        if claims.is_expired() {
            return Err(TokenError::Expired.into());
        }

        if claims.kind != expected_kind {
            warn!(
                "Token kind mismatch: expected {}, got {}",
                expected_kind, claims.kind
            );
            return Err(TokenError::WrongKind.into());
        }

        if self.registry.is_revoked(&claims.jti) {
            return Err(TokenError::Revoked.into());
        }

        Ok(claims)
    }

    /// Exchanges a valid refresh token for a fresh access token, consuming
    /// the refresh token.
    ///
    /// The consumed identifier is revoked before the new token is handed
    /// back; the registry insert doubles as the claim step, so a racing
    /// duplicate rotation with the same refresh token fails as revoked.
    /// No new refresh token is issued - each one rotates exactly once,
    /// after which the client re-authenticates.
    pub fn rotate(&self, refresh_token: &str) -> Result<(Claims, AccessGrant), DomainError> {
        let claims = self.validate(refresh_token, TokenKind::Refresh)?;

        if !self.registry.revoke(&claims.jti, claims.expires_at()) {
            return Err(TokenError::Revoked.into());
        }

        let access_token = self.issue(
            claims.user_id().map_err(|_| TokenError::Invalid)?,
            &claims.username,
            TokenKind::Access,
            self.config.access_token_ttl,
        )?;

        let grant = AccessGrant {
            access_token,
            expires_in: self.access_token_lifetime(),
        };
        Ok((claims, grant))
    }

    /// Revokes a presented access token (the logout path).
    ///
    /// Terminal for that token; any refresh token the caller still holds
    /// is unaffected.
    pub fn revoke_access(&self, access_token: &str) -> Result<Claims, DomainError> {
        let claims = self.validate(access_token, TokenKind::Access)?;
        self.registry.revoke(&claims.jti, claims.expires_at());
        Ok(claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }
}
