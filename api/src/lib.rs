//! HTTP API layer for the Courier messaging backend.
//!
//! Exposes the REST surface (auth, messages, groups) on top of the
//! domain services in `courier_core`. Route handlers are generic over
//! the repository traits so integration tests can run the full HTTP
//! stack against in-memory mocks.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
