//! Domain entities representing core business objects.

pub mod group;
pub mod message;
pub mod token;
pub mod user;


// Re-export commonly used types
pub use group::{Group, GroupMember, MAX_GROUP_ADMINS, MAX_GROUP_MEMBERS};
pub use message::Message;
pub use token::{generate_token_id, Claims, TokenKind, TokenPair};
pub use user::User;
