use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::github::GithubError;

/// Request-level failures. Display strings double as the public error
/// messages; upstream detail stays in the source chain and the logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing owner or repo parameter")]
    MissingParameter,
    #[error("Failed to fetch repository details")]
    Upstream(#[from] GithubError),
    #[error("configuration error: {0}")]
    Config(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
