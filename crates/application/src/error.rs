use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication errors (401)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Authorization errors (403)
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// Validation errors (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Not found errors (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Message or thread store failures (500), carries the store's detail
    #[error("Store error: {0}")]
    Store(anyhow::Error),

    /// Internal server errors (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code for the error
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Authentication(_) => 401,
            AppError::Authorization(_) => 403,
            AppError::Validation(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Store(_) | AppError::Internal(_) => 500,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Authentication(_) => "AUTHENTICATION_FAILED",
            AppError::Authorization(_) => "AUTHORIZATION_FAILED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// JSON body returned for every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse {
            error: err.to_string(),
            error_code: err.error_code().to_string(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Authentication(format!("JWT error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "validation failed".to_string())
                    )
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join(", "))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(format!("Invalid UUID: {}", err))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::Validation(format!("Parse error: {}", err))
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_status_codes() {
        let auth_error = AppError::Authentication("test".to_string());
        assert_eq!(auth_error.status_code(), 401);
        assert_eq!(auth_error.error_code(), "AUTHENTICATION_FAILED");

        let validation_error = AppError::Validation("test".to_string());
        assert_eq!(validation_error.status_code(), 400);
        assert_eq!(validation_error.error_code(), "VALIDATION_ERROR");

        let store_error = AppError::Store(anyhow::anyhow!("connection refused"));
        assert_eq!(store_error.status_code(), 500);
        assert_eq!(store_error.error_code(), "STORE_ERROR");
        assert_eq!(store_error.to_string(), "Store error: connection refused");
    }

    #[test]
    fn test_bad_uuid_is_a_validation_error() {
        let err: AppError = uuid::Uuid::parse_str("nope").unwrap_err().into();
        assert_eq!(err.status_code(), 400);
    }
}
