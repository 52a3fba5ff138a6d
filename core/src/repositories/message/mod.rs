pub mod mock;
pub mod repository;

pub use mock::MockMessageRepository;
pub use repository::MessageRepository;
