use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::Recommender;
use crate::models::{AnalyzeAnswersRequest, GenerateRecommendationsRequest, HealthResponse, RecommendationResponse};
use crate::routes::{error_response, validation_response};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
}

/// Configure recommendation and quiz routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations/generate", web::post().to(generate_recommendations))
        .route("/quiz/analyze", web::post().to(analyze_answers));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = state.recommender.health().await;

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate recommendations endpoint
///
/// POST /api/v1/recommendations/generate
///
/// Request body:
/// ```json
/// {
///   "gender": "female",
///   "answers": {
///     "1": { "text": "Linen sets", "aesthetic": "Coastal Grandma", "tags": ["relaxed", "natural"] }
///   },
///   "limit": 12,
///   "userId": "string"
/// }
/// ```
async fn generate_recommendations(
    state: web::Data<AppState>,
    req: web::Json<GenerateRecommendationsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate request: {:?}", errors);
        return validation_response(errors);
    }

    match state.recommender.generate(req.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(RecommendationResponse::from(result)),
        Err(e) => {
            tracing::info!("Generate request rejected: {}", e);
            error_response(&e)
        }
    }
}

/// Analyze answers endpoint
///
/// POST /api/v1/quiz/analyze
async fn analyze_answers(
    state: web::Data<AppState>,
    req: web::Json<AnalyzeAnswersRequest>,
) -> impl Responder {
    match state.recommender.analyze(&req.answers) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => error_response(&e),
    }
}
