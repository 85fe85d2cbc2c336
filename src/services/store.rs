use crate::core::filters::FilterSpec;
use crate::models::{CatalogOrder, FashionItem, QuizHistoryRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when reading or writing a store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid row: {0}")]
    InvalidRow(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the fashion item catalog
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Number of items matching the filter
    async fn count(&self, filter: &FilterSpec) -> Result<u64, StoreError>;

    /// Items matching the filter, ordered, after skipping `offset` rows
    async fn query(
        &self,
        filter: &FilterSpec,
        order: CatalogOrder,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<FashionItem>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<FashionItem>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Append-only quiz submission history
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn save(&self, record: &QuizHistoryRecord) -> Result<(), StoreError>;
}
