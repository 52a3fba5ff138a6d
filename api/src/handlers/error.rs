//! Mapping of domain errors onto HTTP responses.

use actix_web::HttpResponse;
use log::{error, warn};
use validator::ValidationErrors;

use courier_core::errors::{AuthError, DomainError};
use courier_shared::types::ErrorResponse;

/// The single body returned for every token rejection and for
/// credential failures. Expired, revoked, malformed, and wrong-kind
/// tokens are indistinguishable to callers; the distinction is logged.
pub fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        "unauthorized",
        "Invalid or expired token",
    ))
}

/// Renders payload validation failures as a 400 with field messages.
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let message = errors
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect::<Vec<_>>()
        .join("; ");

    let message = if message.is_empty() {
        "Invalid request payload".to_string()
    } else {
        message
    };

    HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
}

/// Maps a domain error onto its HTTP representation.
pub fn domain_error_response(err: DomainError) -> HttpResponse {
    match err {
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("{resource} not found"),
        )),
        DomainError::Conflict { message } => {
            HttpResponse::Conflict().json(ErrorResponse::new("conflict", message))
        }
        DomainError::Forbidden { message } => {
            HttpResponse::Forbidden().json(ErrorResponse::new("forbidden", message))
        }
        DomainError::Unauthorized => unauthorized_response(),
        DomainError::Auth(AuthError::InvalidCredentials) => HttpResponse::Unauthorized().json(
            ErrorResponse::new("invalid_credentials", "Invalid username or password"),
        ),
        DomainError::Auth(AuthError::UserAlreadyExists) => HttpResponse::Conflict().json(
            ErrorResponse::new("conflict", "Username is already taken"),
        ),
        DomainError::Auth(AuthError::UserNotFound) => {
            HttpResponse::NotFound().json(ErrorResponse::new("not_found", "User not found"))
        }
        DomainError::Auth(AuthError::PasswordHashFailure) => {
            error!("Password hashing failed");
            internal_error_response()
        }
        DomainError::Token(reason) => {
            warn!("Rejected token: {}", reason);
            unauthorized_response()
        }
        DomainError::Internal { message } => {
            error!("Internal error: {}", message);
            internal_error_response()
        }
    }
}

fn internal_error_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        "internal_error",
        "An internal error occurred",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use courier_core::errors::TokenError;

    #[test]
    fn every_token_rejection_maps_to_the_same_status() {
        for reason in [
            TokenError::Invalid,
            TokenError::Expired,
            TokenError::WrongKind,
            TokenError::Revoked,
        ] {
            let resp = domain_error_response(DomainError::Token(reason));
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn validation_errors_map_to_bad_request() {
        let resp = domain_error_response(DomainError::validation("Content must not be empty"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        let resp = domain_error_response(DomainError::Conflict {
            message: "Username is already taken".to_string(),
        });
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_errors_hide_their_message() {
        let resp = domain_error_response(DomainError::internal("pool exhausted"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
