//! Error types for the BLINNO API.
//!
//! Every handler returns `Result<_, ApiError>`. The response body always has
//! the same shape:
//!
//! ```json
//! { "code": "LIMIT_REACHED", "message": "Product limit reached (5). Upgrade your plan to create more.", "limit": 5 }
//! ```
//!
//! `limit` is only present on `LIMIT_REACHED`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use blinno_core::{CoreError, Limit, ValidationError};
use blinno_db::DbError;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("{message}")]
    LimitReached { message: String, limit: Limit },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::AuthFailed(_) => StatusCode::UNAUTHORIZED,
            ApiError::LimitReached { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Machine-readable code for the frontend.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::AuthFailed(_) => "UNAUTHORIZED",
            ApiError::LimitReached { .. } => "LIMIT_REACHED",
            ApiError::InvalidRequest(_) => "BAD_REQUEST",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Database(_) | ApiError::Internal(_) => "INTERNAL_ERROR",
            ApiError::Unavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    fn body(&self) -> ErrorBody {
        let message = match self {
            // Details stay in the logs.
            ApiError::Database(_) | ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let limit = match self {
            ApiError::LimitReached { limit, .. } => Some(*limit),
            _ => None,
        };

        ErrorBody {
            code: self.code(),
            message,
            limit,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LimitReached { kind, limit } => ApiError::LimitReached {
                message: CoreError::LimitReached { kind, limit }.to_string(),
                limit,
            },
            CoreError::Validation(e) => ApiError::Validation(e),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::NotFound(format!("{} {}", entity, id)),
            DbError::UniqueViolation { constraint } => ApiError::Conflict(constraint),
            DbError::ForeignKeyViolation { message } => ApiError::InvalidRequest(message),
            DbError::CheckViolation { constraint } => ApiError::InvalidRequest(constraint),
            DbError::PoolExhausted => ApiError::Unavailable("database busy".to_string()),
            DbError::ConnectionFailed(msg) => ApiError::Unavailable(msg),
            other => ApiError::Database(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}
