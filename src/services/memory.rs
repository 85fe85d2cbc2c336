use crate::core::filters::FilterSpec;
use crate::core::ranking::rank_items;
use crate::models::{CatalogOrder, FashionItem, QuizHistoryRecord};
use crate::services::store::{CatalogStore, HistoryStore, StoreError};
use async_trait::async_trait;
use std::path::Path;
use tokio::sync::RwLock;

/// In-process catalog and history
///
/// Created once at startup and never reset. Ranking runs the same
/// score-then-random ordering the SQL store applies.
#[derive(Default)]
pub struct InMemoryStore {
    items: RwLock<Vec<FashionItem>>,
    history: RwLock<Vec<QuizHistoryRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<FashionItem>) -> Self {
        Self {
            items: RwLock::new(items),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Load the catalog from a JSON array of items
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let items: Vec<FashionItem> = serde_json::from_str(&raw)?;

        if let Some(item) = items.iter().find(|item| !item.style_score.is_finite()) {
            return Err(StoreError::InvalidRow(format!(
                "item {} has a non-finite style score",
                item.id
            )));
        }

        tracing::info!(
            "Seeded in-memory catalog with {} items from {}",
            items.len(),
            path.as_ref().display()
        );

        Ok(Self::with_items(items))
    }

    pub async fn insert_items(&self, items: impl IntoIterator<Item = FashionItem>) {
        self.items.write().await.extend(items);
    }

    /// Snapshot of the recorded quiz history, oldest first
    pub async fn history(&self) -> Vec<QuizHistoryRecord> {
        self.history.read().await.clone()
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn count(&self, filter: &FilterSpec) -> Result<u64, StoreError> {
        let items = self.items.read().await;
        Ok(items.iter().filter(|item| filter.matches(item)).count() as u64)
    }

    async fn query(
        &self,
        filter: &FilterSpec,
        order: CatalogOrder,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<FashionItem>, StoreError> {
        let mut matched: Vec<FashionItem> = {
            let items = self.items.read().await;
            items.iter().filter(|item| filter.matches(item)).cloned().collect()
        };

        rank_items(&mut matched, order, &mut rand::thread_rng());

        Ok(matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Option<FashionItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[async_trait]
impl HistoryStore for InMemoryStore {
    async fn save(&self, record: &QuizHistoryRecord) -> Result<(), StoreError> {
        self.history.write().await.push(record.clone());
        Ok(())
    }
}
