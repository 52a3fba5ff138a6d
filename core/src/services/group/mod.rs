//! Group service: creation, membership management, listings.

mod service;


pub use service::GroupService;
