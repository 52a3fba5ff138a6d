//! HTTP response helpers.

pub mod error;

pub use error::{domain_error_response, unauthorized_response, validation_error_response};
