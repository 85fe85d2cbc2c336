use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// One submitted quiz answer, keyed by question id in [`QuizAnswers`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub aesthetic: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl QuizAnswer {
    /// The aesthetic label, if present and not blank
    pub fn aesthetic_label(&self) -> Option<&str> {
        self.aesthetic
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

/// Answers keyed by question id. Ordered so iteration is deterministic.
pub type QuizAnswers = BTreeMap<String, QuizAnswer>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unisex,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unisex => "unisex",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "unisex" => Ok(Gender::Unisex),
            other => Err(format!(
                "gender must be one of: male, female, unisex (got {:?})",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    Low,
    Mid,
    High,
    Premium,
}

impl PriceRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Low => "low",
            PriceRange::Mid => "mid",
            PriceRange::High => "high",
            PriceRange::Premium => "premium",
        }
    }
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(PriceRange::Low),
            "mid" => Ok(PriceRange::Mid),
            "high" => Ok(PriceRange::High),
            "premium" => Ok(PriceRange::Premium),
            other => Err(format!(
                "price range must be one of: low, mid, high, premium (got {:?})",
                other
            )),
        }
    }
}

/// Style profile derived from a set of quiz answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AestheticProfile {
    pub dominant: String,
    pub score: u8,
    pub tags: BTreeSet<String>,
    pub description: String,
}

/// Catalog row as read from the fashion item store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FashionItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    pub gender: String,
    #[serde(rename = "baseColor")]
    pub base_color: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
    #[serde(rename = "styleScore")]
    pub style_score: f64,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FashionItem {
    pub fn has_any_tag(&self, tags: &BTreeSet<String>) -> bool {
        self.tags.iter().any(|tag| tags.contains(tag))
    }
}

/// Ranked items annotated with the profile that produced them
#[derive(Debug, Clone)]
pub struct RecommendationResult {
    pub items: Vec<FashionItem>,
    pub profile: AestheticProfile,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Append-only record of a quiz submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizHistoryRecord {
    pub id: uuid::Uuid,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub gender: Gender,
    pub answers: QuizAnswers,
    pub aesthetic: String,
    pub score: u8,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl QuizHistoryRecord {
    pub fn new(
        user_id: Option<String>,
        gender: Gender,
        answers: QuizAnswers,
        profile: &AestheticProfile,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            user_id,
            gender,
            answers,
            aesthetic: profile.dominant.clone(),
            score: profile.score,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Ordering applied to a catalog query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrder {
    /// `styleScore` descending, random among equal scores
    #[default]
    Ranked,
    /// `createdAt` descending
    Newest,
}

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// One page of results plus navigation metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(rename = "totalItems")]
    pub total_items: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
    #[serde(rename = "hasPrev")]
    pub has_prev: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: u64, request: PageRequest) -> Self {
        let total_pages = if request.limit == 0 {
            0
        } else {
            total_items.div_ceil(request.limit as u64)
        };

        Self {
            items,
            total_items,
            total_pages,
            page: request.page,
            limit: request.limit,
            has_next: (request.page as u64) < total_pages,
            has_prev: request.page > 1,
        }
    }
}
