//! Repository interfaces for the persistence layer.
//!
//! Traits live here; the MySQL implementations live in `courier_infra`.
//! In-memory mocks are provided for tests.

pub mod group;
pub mod message;
pub mod user;

pub use group::GroupRepository;
pub use message::MessageRepository;
pub use user::UserRepository;

pub use group::MockGroupRepository;
pub use message::MockMessageRepository;
pub use user::MockUserRepository;
