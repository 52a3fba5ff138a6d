//! Messaging service: direct and group message routing.

mod service;


pub use service::{MessageService, SendMessage};
