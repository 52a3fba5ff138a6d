use actix_web::{web, HttpResponse};
use validator::Validate;

use courier_core::repositories::{GroupRepository, MessageRepository, UserRepository};

use crate::dto::{RefreshRequest, RefreshResponse};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new access token. Each refresh token
/// works exactly once: rotation revokes it, and no replacement refresh
/// token is issued, so the session ends when it expires.
///
/// # Response (200 OK)
///
/// ```json
/// {
///     "access_token": "eyJ...",
///     "expires_in": 900
/// }
/// ```
///
/// # Errors
/// - 401 Unauthorized: token invalid, expired, already used, or not a
///   refresh token; all four render the same body
pub async fn refresh<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    request: web::Json<RefreshRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.refresh(&request.refresh_token) {
        Ok(grant) => HttpResponse::Ok().json(RefreshResponse {
            access_token: grant.access_token,
            expires_in: grant.expires_in,
        }),
        Err(error) => domain_error_response(error),
    }
}
