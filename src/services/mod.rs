// Service exports
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod profiles;

pub use cache::{CacheManager, CacheKey, CacheError};
pub use memory::MemoryProfileStore;
pub use postgres::{PostgresClient, PostgresError};
pub use profiles::{ExplorePage, ProfileRepository, ProfileStore, RepositoryError};
