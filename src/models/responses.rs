use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use crate::models::domain::{AestheticProfile, FashionItem, RecommendationResult};

/// Response for the generate recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<FashionItem>,
    #[serde(rename = "aestheticProfile")]
    pub aesthetic_profile: String,
    #[serde(rename = "aestheticScore")]
    pub aesthetic_score: u8,
    #[serde(rename = "styleTags")]
    pub style_tags: BTreeSet<String>,
    #[serde(rename = "styleDescription")]
    pub style_description: String,
    #[serde(rename = "totalGenerated")]
    pub total_generated: usize,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl From<RecommendationResult> for RecommendationResponse {
    fn from(result: RecommendationResult) -> Self {
        let AestheticProfile {
            dominant,
            score,
            tags,
            description,
        } = result.profile;

        Self {
            total_generated: result.items.len(),
            recommendations: result.items,
            aesthetic_profile: dominant,
            aesthetic_score: score,
            style_tags: tags,
            style_description: description,
            generated_at: result.generated_at,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
