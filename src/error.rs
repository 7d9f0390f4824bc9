use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

use crate::services::gemini_service::GeminiError;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Seed data error: {0}")]
    Seed(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to generate travel itinerary")]
    Generation(#[source] GeminiError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Generation(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Driver messages stay in the logs
            ApiError::Store(err) => {
                log::error!("Store failure: {}", err);
                "Internal server error".to_string()
            }
            ApiError::Generation(err) => {
                log::error!("Itinerary generation failed: {}", err);
                self.to_string()
            }
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidInput("message is required".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("Itinerary not found".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Generation(GeminiError::MissingApiKey).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_generation_error_message_is_generic() {
        let err = ApiError::Generation(GeminiError::ResponseError("boom".to_string()));
        assert_eq!(err.to_string(), "Failed to generate travel itinerary");
    }
}
