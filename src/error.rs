//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::list::ListError;

/// Client-facing message for every internal failure. Detail goes to the log only.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// One failed input field, reported back to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("list API key is not configured")]
    MissingApiKey,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("list sync: {0}")]
    ListSync(#[from] ListError),
    #[error("route not found")]
    NotFound,
    #[error("rate limited")]
    RateLimited,
}

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

#[derive(Serialize)]
struct ValidationBody {
    message: &'static str,
    errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationBody {
                    message: "Validation failed",
                    errors,
                }),
            )
                .into_response(),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(MessageBody {
                    message: "Route not found",
                }),
            )
                .into_response(),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(MessageBody {
                    message: RATE_LIMITED_MESSAGE,
                }),
            )
                .into_response(),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageBody {
                        message: GENERIC_ERROR_MESSAGE,
                    }),
                )
                    .into_response()
            }
        }
    }
}
