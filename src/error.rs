use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Row index {index} out of range for similarity matrix of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("No valid recommendations: {0}")]
    NoValidRecommendations(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code sent alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DataUnavailable(_) => "data_unavailable",
            AppError::NotFound(_) => "not_found",
            AppError::IndexOutOfRange { .. } => "index_out_of_range",
            AppError::NoValidRecommendations(_) => "no_valid_recommendations",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) | AppError::NoValidRecommendations(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::IndexOutOfRange { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        }

        let message = match self {
            AppError::DataUnavailable(msg)
            | AppError::NotFound(msg)
            | AppError::NoValidRecommendations(msg)
            | AppError::InvalidInput(msg) => msg,
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
