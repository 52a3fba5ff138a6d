//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for an internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password; callers must not be able to
    /// tell the two apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Password hashing failed")]
    PasswordHashFailure,
}

/// Token-related errors.
///
/// The validator distinguishes these internally for diagnostics; the API
/// layer collapses all of them into a single unauthorized response.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed token or bad signature
    #[error("Invalid token")]
    Invalid,

    #[error("Token expired")]
    Expired,

    /// Token kind does not match the expected use, e.g. a refresh token
    /// presented where an access token is required
    #[error("Wrong token kind")]
    WrongKind,

    #[error("Token revoked")]
    Revoked,

    /// Signing secret unavailable or signing failed
    #[error("Token generation failed")]
    GenerationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_convert_into_domain_errors() {
        let err: DomainError = TokenError::Revoked.into();
        assert!(matches!(err, DomainError::Token(TokenError::Revoked)));
    }

    #[test]
    fn error_messages_do_not_leak_the_rejection_reason_shape() {
        // All four validator rejections render as short internal strings;
        // the API layer never forwards them to callers.
        assert_eq!(TokenError::Invalid.to_string(), "Invalid token");
        assert_eq!(TokenError::Expired.to_string(), "Token expired");
        assert_eq!(TokenError::WrongKind.to_string(), "Wrong token kind");
        assert_eq!(TokenError::Revoked.to_string(), "Token revoked");
    }
}
