pub mod mock;
pub mod repository;

pub use mock::MockGroupRepository;
pub use repository::GroupRepository;
