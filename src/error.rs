use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Catalog authentication failed: {0}")]
    Authentication(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short label reported in the `error` field of the response body
    pub fn label(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "Invalid request",
            AppError::Configuration(_) | AppError::Internal(_) => "Internal server error",
            AppError::Authentication(_) => "Catalog authentication failed",
            AppError::HttpClient(_) | AppError::ExternalApi(_) => "Catalog unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Authentication(_) | AppError::HttpClient(_) | AppError::ExternalApi(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::InvalidInput(msg)
            | AppError::Configuration(msg)
            | AppError::Authentication(msg)
            | AppError::ExternalApi(msg)
            | AppError::Internal(msg) => msg.clone(),
            AppError::HttpClient(_) => self.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "success": false,
            "error": self.label(),
            "message": message,
            "timestamp": Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_client_error() {
        let err = AppError::InvalidInput("bad path".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.label(), "Invalid request");
    }

    #[test]
    fn test_fatal_errors_are_server_errors() {
        assert_eq!(
            AppError::Configuration("missing".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Authentication("rejected".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
