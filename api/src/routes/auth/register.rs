use actix_web::{web, HttpResponse};
use validator::Validate;

use courier_core::repositories::{GroupRepository, MessageRepository, UserRepository};
use courier_shared::types::MessageResponse;

use crate::dto::RegisterRequest;
use crate::handlers::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates a new user account.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
///     "mobile_no": "5551234567",
///     "password": "correct-horse"
/// }
/// ```
///
/// # Errors
/// - 400 Bad Request: payload fails validation
/// - 409 Conflict: username already taken
pub async fn register<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    request: web::Json<RegisterRequest>,
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
        .register(&request.username, &request.mobile_no, &request.password)
        .await
    {
        Ok(_) => {
            HttpResponse::Created().json(MessageResponse::new("User registered successfully"))
        }
        Err(error) => domain_error_response(error),
    }
}
