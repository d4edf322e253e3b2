//! Centralized API error handling for Lendora
//!
//! A unified error type for API responses. Every error is converted at the
//! handler boundary into the uniform `{success, message}` envelope with the
//! matching HTTP status code. Server-side causes are logged; clients only
//! ever see a generic message for 5xx errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate resource: {0}")]
    Duplicate(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error envelope body, mirroring the success envelope shape
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Duplicate(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DatabaseUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Server errors are reduced to a generic
    /// message; the detail stays in the logs.
    fn client_message(&self) -> String {
        match self {
            ApiError::Database(_) | ApiError::Internal(_) => {
                "Internal server error".to_string()
            }
            ApiError::DatabaseUnavailable(_) => "Database unavailable".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Database(_) | ApiError::Internal(_) | ApiError::DatabaseUnavailable(_) => {
                tracing::error!(error = %self, "Server error occurred");
            }
            _ => {
                tracing::debug!(error = %self, "Client error occurred");
            }
        }

        let body = ErrorBody {
            success: false,
            message: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}

// Convenience conversions from common error types

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                ApiError::DatabaseUnavailable(err.to_string())
            }
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Duplicate("Resource already exists".to_string())
            }
            _ => ApiError::Database(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::Internal(format!("Password hashing failed: {}", err))
    }
}

/// Result type alias using ApiError
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation("amount out of range".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Duplicate("email taken".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("no such loan".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::DatabaseUnavailable("pool timed out".to_string()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_are_generic_to_clients() {
        let err = ApiError::Database("relation \"loans\" does not exist".to_string());
        assert_eq!(err.client_message(), "Internal server error");

        let err = ApiError::DatabaseUnavailable("pool timed out".to_string());
        assert_eq!(err.client_message(), "Database unavailable");

        // Client errors keep their detail
        let err = ApiError::Validation("loan amount below minimum".to_string());
        assert!(err.client_message().contains("loan amount below minimum"));
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
