// Service exports
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod store;

pub use cache::CountCache;
pub use memory::InMemoryStore;
pub use postgres::PostgresClient;
pub use store::{CatalogStore, HistoryStore, StoreError};
