//! # Courier Infrastructure
//!
//! MySQL implementations of the `courier_core` repository traits, plus
//! connection pool construction.

pub mod database;

pub use database::mysql::{MySqlGroupRepository, MySqlMessageRepository, MySqlUserRepository};
pub use database::create_pool;
