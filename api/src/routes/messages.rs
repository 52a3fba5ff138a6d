//! Messaging endpoints: send, feed, conversation, and group history.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use courier_core::repositories::{GroupRepository, MessageRepository, UserRepository};

use crate::dto::{MessageDto, MessagesResponse, SendMessageRequest};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for POST /api/v1/messages
///
/// Sends a direct message (when `receiver_id` is set) or a group
/// message (when `group_id` is set). Setting both or neither is a
/// validation error.
pub async fn send<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    auth: AuthContext,
    request: web::Json<SendMessageRequest>,
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
        .message_service
        .send(auth.user_id, request.into_inner().into())
        .await
    {
        Ok(message) => HttpResponse::Created().json(MessageDto::from(message)),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for GET /api/v1/messages
///
/// Returns the caller's recent messages across direct conversations and
/// group memberships, newest first.
pub async fn feed<U, M, G>(state: web::Data<AppState<U, M, G>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    match state.message_service.feed(auth.user_id).await {
        Ok(messages) => HttpResponse::Ok().json(MessagesResponse::from_messages(messages)),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for GET /api/v1/messages/conversation/{user_id}
///
/// Returns the direct conversation between the caller and another user.
pub async fn conversation<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    let other_user_id = path.into_inner();
    match state
        .message_service
        .conversation(auth.user_id, other_user_id)
        .await
    {
        Ok(messages) => HttpResponse::Ok().json(MessagesResponse::from_messages(messages)),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for GET /api/v1/messages/group/{group_id}
///
/// Returns a group's recent messages; the caller must be a member.
pub async fn group_history<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    let group_id = path.into_inner();
    match state
        .message_service
        .group_history(auth.user_id, group_id)
        .await
    {
        Ok(messages) => HttpResponse::Ok().json(MessagesResponse::from_messages(messages)),
        Err(error) => domain_error_response(error),
    }
}
