// Route exports
pub mod items;
pub mod recommendations;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use crate::error::RecommendationError;
use crate::models::ErrorResponse;

pub use recommendations::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(recommendations::configure)
            .configure(items::configure),
    );
}

/// JSON error response for extractor failures
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Map a recommendation error onto the JSON error body
///
/// Storage failures and timeouts get a generic retry message; details stay in
/// the logs.
pub(crate) fn error_response(err: &RecommendationError) -> HttpResponse {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match err {
        RecommendationError::StorageUnavailable(_) | RecommendationError::Timeout(_) => {
            "Recommendations are temporarily unavailable, please try again".to_string()
        }
        other => other.to_string(),
    };

    HttpResponse::build(status).json(ErrorResponse {
        error: err.kind().to_string(),
        message,
        status_code: status.as_u16(),
    })
}

pub(crate) fn validation_response(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_argument".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
