//! MySQL repository implementations

mod group_repository_impl;
mod message_repository_impl;
mod user_repository_impl;

pub use group_repository_impl::MySqlGroupRepository;
pub use message_repository_impl::MySqlMessageRepository;
pub use user_repository_impl::MySqlUserRepository;

use courier_core::errors::DomainError;

/// Maps a sqlx error into a domain error with a stable message prefix.
pub(crate) fn db_error(context: &str, error: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("{context}: {error}"),
    }
}
