// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AestheticProfile, CatalogOrder, FashionItem, Gender, Page, PageRequest, PriceRange, QuizAnswer,
    QuizAnswers, QuizHistoryRecord, RecommendationResult,
};
pub use requests::{split_csv, AnalyzeAnswersRequest, GenerateRecommendationsRequest, ListItemsQuery};
pub use responses::{ErrorResponse, HealthResponse, RecommendationResponse};
