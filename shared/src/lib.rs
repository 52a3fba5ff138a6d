//! Shared configuration and common types for the Courier backend.
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types (server, database, JWT)
//! - Common API response structures

pub mod config;
pub mod types;

pub use config::{DatabaseConfig, JwtConfig, ServerConfig};
pub use types::ErrorResponse;
