//! Request and response payloads for the HTTP surface.

pub mod auth_dto;
pub mod group_dto;
pub mod message_dto;

pub use auth_dto::*;
pub use group_dto::*;
pub use message_dto::*;
