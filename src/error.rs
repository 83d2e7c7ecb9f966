use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Upstream returned {status}: {detail}")]
    UpstreamError { status: u16, detail: String },

    #[error("Error parsing response: {0}")]
    ParseError(String),

    #[error("{0}")]
    NotFoundError(String),

    #[error("Invalid query: {0}")]
    InvalidQueryError(String),

    #[error("Failed to reach upstream: {0}")]
    FetchError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UpstreamError { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::ParseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFoundError(_) => StatusCode::NOT_FOUND,
            AppError::InvalidQueryError(_) => StatusCode::BAD_REQUEST,
            AppError::FetchError(_) => StatusCode::BAD_GATEWAY,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            AppError::UpstreamError { detail, .. } => detail,
            AppError::NotFoundError(msg) => msg,
            other => other.to_string(),
        };

        response::error(status, detail).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        AppError::FetchError(err.without_url().to_string())
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
