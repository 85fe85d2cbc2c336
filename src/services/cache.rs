use crate::core::filters::FilterSpec;
use moka::future::{Cache, CacheBuilder};
use std::time::Duration;

/// In-process cache of catalog counts per filter
///
/// Only totals are cached. Item pages are never cached because ranked pages
/// are reshuffled among equal scores on every read. Entries are keyed on the
/// filter itself.
#[derive(Clone)]
pub struct CountCache {
    counts: Cache<FilterSpec, u64>,
}

impl CountCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let counts = CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { counts }
    }

    pub async fn get(&self, filter: &FilterSpec) -> Option<u64> {
        let hit = self.counts.get(filter).await;
        if hit.is_some() {
            tracing::trace!("Count cache hit: {:?}", filter);
        }
        hit
    }

    pub async fn set(&self, filter: &FilterSpec, count: u64) {
        self.counts.insert(filter.clone(), count).await;
    }

    pub async fn invalidate_all(&self) {
        self.counts.invalidate_all();
        self.counts.run_pending_tasks().await;
    }

}
