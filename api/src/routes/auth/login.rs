use actix_web::{web, HttpResponse};
use validator::Validate;

use courier_core::repositories::{GroupRepository, MessageRepository, UserRepository};

use crate::dto::{AuthResponse, LoginRequest};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Verifies credentials and returns an access/refresh token pair.
///
/// # Response (200 OK)
///
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "expires_in": 900
/// }
/// ```
///
/// # Errors
/// - 401 Unauthorized: unknown username or wrong password; the two are
///   not distinguishable from the response
pub async fn login<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse::from(pair)),
        Err(error) => domain_error_response(error),
    }
}
