//! Authentication service: registration, login, token refresh, logout.

mod service;


pub use service::AuthService;
