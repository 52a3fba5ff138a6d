//! Common types shared across server modules

pub mod response;

pub use response::{ErrorResponse, MessageResponse};
