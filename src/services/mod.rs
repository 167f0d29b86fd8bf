// Service exports
pub mod auth;
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod store;

pub use auth::{AuthError, AuthService, Claims};
pub use cache::{CacheKey, CatalogCache};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use store::{MarketplaceStore, StoreError};
