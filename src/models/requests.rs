use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to generate recommendations from a quiz submission
///
/// `gender` and `answers` stay loosely typed here so that a missing gender or
/// a non-object answers value is reported as an invalid argument rather than
/// a JSON decoding failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateRecommendationsRequest {
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub answers: serde_json::Value,
    #[validate(range(max = 1000))]
    #[serde(default)]
    pub limit: Option<u32>,
    #[validate(length(min = 1, max = 128))]
    #[serde(default, alias = "user_id", rename = "userId")]
    pub user_id: Option<String>,
}

/// Request to analyze answers without querying the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeAnswersRequest {
    #[serde(default)]
    pub answers: serde_json::Value,
}

/// Query string for the paginated item listing
///
/// `tags` and `priceRange` are comma separated.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListItemsQuery {
    pub gender: Option<String>,
    pub tags: Option<String>,
    #[serde(alias = "price_range", rename = "priceRange")]
    pub price_range: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub category: Option<String>,
    /// 1-based; 0 is read as the first page
    #[validate(range(max = 100000))]
    #[serde(default = "default_page")]
    pub page: u32,
    #[validate(range(max = 1000))]
    pub limit: Option<u32>,
    pub sort: Option<String>,
}

fn default_page() -> u32 {
    1
}

/// Split a comma separated query value, dropping empty segments
pub fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
