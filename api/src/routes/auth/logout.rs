use actix_web::{web, HttpResponse};

use courier_core::repositories::{GroupRepository, MessageRepository, UserRepository};
use courier_shared::types::MessageResponse;

use crate::handlers::domain_error_response;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented access token. The token is rejected on every
/// subsequent request until its natural expiry, after which the
/// revocation record is dropped. Other tokens held by the same user,
/// including the refresh token, are unaffected.
pub async fn logout<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    match state.auth_service.logout(&auth.token) {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")),
        Err(error) => domain_error_response(error),
    }
}
