use actix_web::{web, HttpResponse};

use courier_core::repositories::{GroupRepository, MessageRepository, UserRepository};

use crate::dto::UserResponse;
use crate::handlers::domain_error_response;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for GET /api/v1/auth/me
///
/// Returns the authenticated caller's profile.
pub async fn me<U, M, G>(state: web::Data<AppState<U, M, G>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    match state.auth_service.current_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => domain_error_response(error),
    }
}
