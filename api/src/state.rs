//! Shared application state injected into route handlers.

use std::sync::Arc;

use courier_core::repositories::{GroupRepository, MessageRepository, UserRepository};
use courier_core::services::{AuthService, GroupService, MessageService, TokenService};

/// Service container shared across all workers.
///
/// Generic over the repository implementations so the same routing
/// table serves both the MySQL-backed binary and mock-backed tests.
pub struct AppState<U, M, G>
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    pub auth_service: Arc<AuthService<U>>,
    pub message_service: Arc<MessageService<M, G, U>>,
    pub group_service: Arc<GroupService<G, U>>,
    pub token_service: Arc<TokenService>,
}

impl<U, M, G> AppState<U, M, G>
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    pub fn new(
        auth_service: Arc<AuthService<U>>,
        message_service: Arc<MessageService<M, G, U>>,
        group_service: Arc<GroupService<G, U>>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            auth_service,
            message_service,
            group_service,
            token_service,
        }
    }
}
