// Core algorithm exports
pub mod analysis;
pub mod filters;
pub mod ranking;
pub mod recommender;

pub use analysis::{analyze_answers, parse_answers, DEFAULT_AESTHETIC, DEFAULT_SCORE};
pub use filters::{build_filter, filter_for, parse_gender, parse_price_ranges, FilterSpec, Predicate};
pub use ranking::{is_ranked, rank_items};
pub use recommender::{RecommendationLimits, Recommender};
