//! Error handling for the Coffee Tasting API
//!
//! Every error renders as
//! `{"error": {"type", "message", "status_code", "field"?, "details"?}}`.

use axum::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        details: Option<serde_json::Value>,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            field: None,
            details: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.detail().0
    }

    /// Status plus the public body; database and internal messages are not leaked
    fn detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Validation {
                message,
                field,
                details,
            } => {
                let (status, mut detail) =
                    ErrorDetail::new(StatusCode::UNPROCESSABLE_ENTITY, "ValidationError", message);
                detail.field = field.clone();
                detail.details = details.clone();
                (status, detail)
            }
            AppError::NotFound(resource) => ErrorDetail::new(
                StatusCode::NOT_FOUND,
                "NotFoundError",
                format!("{} not found", resource),
            ),
            AppError::Conflict(message) => {
                ErrorDetail::new(StatusCode::CONFLICT, "ConflictError", message)
            }
            AppError::Unauthorized(message) => {
                ErrorDetail::new(StatusCode::UNAUTHORIZED, "UnauthorizedError", message)
            }
            AppError::Forbidden(message) => {
                ErrorDetail::new(StatusCode::FORBIDDEN, "ForbiddenError", message)
            }
            AppError::Configuration(message) => ErrorDetail::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "ConfigurationError",
                message,
            ),
            AppError::ExternalService(message) => ErrorDetail::new(
                StatusCode::BAD_GATEWAY,
                "ExternalServiceError",
                format!("External service error: {}", message),
            ),
            AppError::RateLimited => ErrorDetail::new(
                StatusCode::TOO_MANY_REQUESTS,
                "RateLimitError",
                "Too many requests, please try again later",
            ),
            AppError::DatabaseError(sqlx::Error::RowNotFound) => {
                ErrorDetail::new(StatusCode::NOT_FOUND, "NotFoundError", "Resource not found")
            }
            AppError::DatabaseError(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                ErrorDetail::new(
                    StatusCode::CONFLICT,
                    "ConflictError",
                    "A record with these values already exists",
                )
            }
            AppError::DatabaseError(sqlx::Error::Database(db))
                if db.is_foreign_key_violation() =>
            {
                ErrorDetail::new(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "ValidationError",
                    "Referenced resource does not exist",
                )
            }
            AppError::DatabaseError(_) => ErrorDetail::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DatabaseError",
                "A database error occurred",
            ),
            AppError::Internal(_) | AppError::InternalError(_) => ErrorDetail::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                "An unexpected error occurred",
            ),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors
            .field_errors()
            .keys()
            .min()
            .map(|field| field.to_string());
        let details = serde_json::to_value(&errors).ok();

        AppError::Validation {
            message: "Request validation failed".to_string(),
            field,
            details,
        }
    }
}

/// Error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorDetail {
    fn new(status: StatusCode, kind: &str, message: impl Into<String>) -> (StatusCode, Self) {
        (
            status,
            Self {
                kind: kind.to_string(),
                message: message.into(),
                status_code: status.as_u16(),
                field: None,
                details: None,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.detail();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = Json(ErrorResponse {
            error: error_detail,
        });

        if status == StatusCode::UNAUTHORIZED {
            (status, [(WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
