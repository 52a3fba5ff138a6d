//! Group management endpoints.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use courier_core::repositories::{GroupRepository, MessageRepository, UserRepository};
use courier_shared::types::MessageResponse;

use crate::dto::{AddMemberRequest, CreateGroupRequest, GroupDto, GroupsResponse, MembersResponse};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for POST /api/v1/groups
///
/// Creates a group; the caller becomes its first member and admin.
pub async fn create<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    auth: AuthContext,
    request: web::Json<CreateGroupRequest>,
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
        .group_service
        .create(&request.group_name, auth.user_id)
        .await
    {
        Ok(group) => HttpResponse::Created().json(GroupDto::from(group)),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for GET /api/v1/groups
///
/// Lists the groups the caller belongs to.
pub async fn list<U, M, G>(state: web::Data<AppState<U, M, G>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    match state.group_service.groups_for(auth.user_id).await {
        Ok(groups) => HttpResponse::Ok().json(GroupsResponse::from_groups(groups)),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for POST /api/v1/groups/{group_id}/members
///
/// Adds a member to a group. Only admins may add members; group size
/// and admin count limits apply.
pub async fn add_member<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<AddMemberRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    let group_id = path.into_inner();
    match state
        .group_service
        .add_member(group_id, auth.user_id, request.member_id, request.is_admin)
        .await
    {
        Ok(()) => HttpResponse::Created().json(MessageResponse::new("Member added successfully")),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for GET /api/v1/groups/{group_id}/members
///
/// Lists a group's members; the caller must be a member.
pub async fn members<U, M, G>(
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
    match state.group_service.members(group_id, auth.user_id).await {
        Ok(members) => HttpResponse::Ok().json(MembersResponse::from_members(members)),
        Err(error) => domain_error_response(error),
    }
}
