//! Stylematch - aesthetic-quiz recommendations over the fashion catalog
//!
//! Turns a quiz submission into an aesthetic profile, builds a typed catalog
//! filter from it, and returns items ranked by style score with random
//! ordering among equal scores.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{analyze_answers, build_filter, FilterSpec, Predicate, RecommendationLimits, Recommender};
pub use error::{AppResult, RecommendationError};
pub use models::{AestheticProfile, FashionItem, Gender, Page, PageRequest, QuizAnswer, QuizAnswers};
