//! Business services containing domain logic and use cases.

pub mod auth;
pub mod group;
pub mod messaging;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use group::GroupService;
pub use messaging::{MessageService, SendMessage};
pub use token::{
    AccessGrant, RevocationRegistry, RevocationSweeper, TokenService, TokenServiceConfig,
};
