use crate::core::analysis::{analyze_answers, parse_answers};
use crate::core::filters::{filter_for, parse_gender, FilterSpec};
use crate::error::{AppResult, RecommendationError};
use crate::models::{
    AestheticProfile, CatalogOrder, FashionItem, GenerateRecommendationsRequest, Page, PageRequest,
    QuizHistoryRecord, RecommendationResult,
};
use crate::services::{CatalogStore, CountCache, HistoryStore, StoreError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Bounds applied to every recommendation and listing call
#[derive(Debug, Clone, Copy)]
pub struct RecommendationLimits {
    pub default_limit: u32,
    pub max_limit: u32,
    pub query_timeout: Duration,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            default_limit: 12,
            max_limit: 100,
            query_timeout: Duration::from_millis(3000),
        }
    }
}

/// Recommendation orchestrator
///
/// # Generate pipeline
/// 1. Validate gender and answers
/// 2. Derive the aesthetic profile
/// 3. Build the typed catalog filter
/// 4. Append the history row on a detached task
/// 5. Read the ranked page
///
/// Catalog failures and timeouts are returned to the caller. The response
/// never waits on the history write; its failures are logged and dropped.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<dyn CatalogStore>,
    history: Arc<dyn HistoryStore>,
    counts: Option<CountCache>,
    limits: RecommendationLimits,
}

impl Recommender {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        history: Arc<dyn HistoryStore>,
        limits: RecommendationLimits,
    ) -> Self {
        Self {
            catalog,
            history,
            counts: None,
            limits,
        }
    }

    /// Cache listing totals in `cache`
    pub fn with_count_cache(mut self, cache: CountCache) -> Self {
        self.counts = Some(cache);
        self
    }

    pub fn limits(&self) -> RecommendationLimits {
        self.limits
    }

    /// Profile for a raw answers value, without touching the catalog
    pub fn analyze(&self, answers: &serde_json::Value) -> AppResult<AestheticProfile> {
        Ok(analyze_answers(&parse_answers(answers)?))
    }

    /// Generate a ranked page of recommendations for a quiz submission
    pub async fn generate(
        &self,
        request: GenerateRecommendationsRequest,
    ) -> AppResult<RecommendationResult> {
        let gender = request
            .gender
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .ok_or_else(|| RecommendationError::InvalidArgument("gender is required".to_string()))
            .and_then(parse_gender)?;
        let answers = parse_answers(&request.answers)?;

        let profile = analyze_answers(&answers);
        let filter = filter_for(gender, &profile.tags);
        let limit = self.resolve_limit(request.limit);

        tracing::debug!(
            "Generating recommendations: gender={}, aesthetic={}, tags={}, limit={}",
            gender,
            profile.dominant,
            profile.tags.len(),
            limit
        );

        let record = QuizHistoryRecord::new(request.user_id, gender, answers, &profile);
        self.record_history(record);

        let items = self.fetch_ranked(&filter, limit).await?;

        tracing::info!(
            "Generated {} recommendations for aesthetic {} (score {})",
            items.len(),
            profile.dominant,
            profile.score
        );

        Ok(RecommendationResult {
            items,
            profile,
            generated_at: chrono::Utc::now(),
        })
    }

    /// Top `limit` items for the filter, `style_score` descending with
    /// random order among equal scores
    pub async fn fetch_ranked(&self, filter: &FilterSpec, limit: u32) -> AppResult<Vec<FashionItem>> {
        let limit = limit.min(self.limits.max_limit);
        if limit == 0 {
            return Ok(Vec::new());
        }

        self.bounded("query", self.catalog.query(filter, CatalogOrder::Ranked, limit, 0))
            .await
    }

    /// One page of the catalog for the filter
    pub async fn list_items(
        &self,
        filter: &FilterSpec,
        request: PageRequest,
        order: CatalogOrder,
    ) -> AppResult<Page<FashionItem>> {
        let request = PageRequest::new(request.page, request.limit.min(self.limits.max_limit));

        if request.limit == 0 {
            let total = self.count(filter).await?;
            return Ok(Page::new(Vec::new(), total, request));
        }

        let (total, items) = tokio::try_join!(
            self.count(filter),
            self.bounded(
                "query",
                self.catalog
                    .query(filter, order, request.limit, request.offset()),
            ),
        )?;

        Ok(Page::new(items, total, request))
    }

    pub async fn get_item(&self, id: i64) -> AppResult<FashionItem> {
        self.bounded("get", self.catalog.get(id))
            .await?
            .ok_or_else(|| RecommendationError::NotFound(format!("fashion item {}", id)))
    }

    pub async fn health(&self) -> bool {
        self.bounded("health check", self.catalog.health_check())
            .await
            .unwrap_or(false)
    }

    pub fn resolve_limit(&self, limit: Option<u32>) -> u32 {
        limit
            .unwrap_or(self.limits.default_limit)
            .min(self.limits.max_limit)
    }

    async fn count(&self, filter: &FilterSpec) -> AppResult<u64> {
        if let Some(cache) = &self.counts {
            if let Some(total) = cache.get(filter).await {
                return Ok(total);
            }
        }

        let total = self.bounded("count", self.catalog.count(filter)).await?;

        if let Some(cache) = &self.counts {
            cache.set(filter, total).await;
        }

        Ok(total)
    }

    fn record_history(&self, record: QuizHistoryRecord) {
        let history = Arc::clone(&self.history);
        let timeout = self.limits.query_timeout;

        tokio::spawn(async move {
            if let Err(e) = save_history(history.as_ref(), &record, timeout).await {
                tracing::warn!("Quiz history not recorded ({}): {}", record.id, e);
            }
        });
    }

    /// Run a catalog call under the query timeout
    async fn bounded<T, F>(&self, operation: &str, call: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.limits.query_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!("Catalog {} failed: {}", operation, e);
                Err(e.into())
            }
            Err(_) => {
                tracing::error!(
                    "Catalog {} timed out after {:?}",
                    operation,
                    self.limits.query_timeout
                );
                Err(RecommendationError::Timeout(self.limits.query_timeout))
            }
        }
    }
}

async fn save_history(
    history: &dyn HistoryStore,
    record: &QuizHistoryRecord,
    timeout: Duration,
) -> AppResult<()> {
    match tokio::time::timeout(timeout, history.save(record)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(RecommendationError::HistoryWriteFailed(e.to_string())),
        Err(_) => Err(RecommendationError::HistoryWriteFailed(format!(
            "timed out after {:?}",
            timeout
        ))),
    }
}
