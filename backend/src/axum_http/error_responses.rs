use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::usecases::plan_requests::PlanRequestError;

/// Body for failures: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body for confirmations and not-found results: `{"message": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(MessageResponse { message })).into_response()
            }
            AppError::Unauthorized => error_body(StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Forbidden => error_body(StatusCode::FORBIDDEN, self.to_string()),
            AppError::BadRequest(message) => error_body(StatusCode::BAD_REQUEST, message),
            AppError::Internal(err) => {
                // Callers log the cause with context; only the category is sent.
                debug!(error = ?err, "http: responding with internal error");
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

fn error_body(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

impl From<PlanRequestError> for AppError {
    fn from(err: PlanRequestError) -> Self {
        match err {
            PlanRequestError::NotFound(_) => AppError::NotFound(err.to_string()),
            PlanRequestError::InvalidInput(message) => AppError::BadRequest(message),
            PlanRequestError::Repository(err) => AppError::Internal(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
