//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - JWT access and refresh token issuance
//! - Token validation (signature, expiry, kind, revocation)
//! - The in-process revocation registry and its background sweeper
//! - Single-use refresh token rotation and logout revocation

mod config;
mod registry;
mod service;
mod sweeper;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use registry::RevocationRegistry;
pub use service::{AccessGrant, TokenService};
pub use sweeper::RevocationSweeper;
