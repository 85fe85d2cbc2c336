use crate::services::store::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the recommendation path
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Catalog storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Catalog query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Quiz history write failed: {0}")]
    HistoryWriteFailed(String),
}

impl RecommendationError {
    /// Stable machine-readable kind used in error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendationError::InvalidArgument(_) => "invalid_argument",
            RecommendationError::NotFound(_) => "not_found",
            RecommendationError::StorageUnavailable(_) => "storage_unavailable",
            RecommendationError::Timeout(_) => "timeout",
            RecommendationError::HistoryWriteFailed(_) => "history_write_failed",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            RecommendationError::InvalidArgument(_) => 400,
            RecommendationError::NotFound(_) => 404,
            RecommendationError::StorageUnavailable(_) => 503,
            RecommendationError::Timeout(_) => 504,
            RecommendationError::HistoryWriteFailed(_) => 500,
        }
    }
}

impl From<StoreError> for RecommendationError {
    fn from(err: StoreError) -> Self {
        RecommendationError::StorageUnavailable(err.to_string())
    }
}

pub type AppResult<T> = Result<T, RecommendationError>;
