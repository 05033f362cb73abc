//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion. Every error carries an
//! explicit [`ErrorKind`]; status codes and client codes are derived from
//! the variant, never from message text.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{BookingError, CatalogError, ReviewError};

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Error taxonomy shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Validation,
    Unauthenticated,
    Forbidden,
    NotFound,
    Conflict,
    DomainRuleViolation,
    Internal,
}

/// Token Service failure kinds.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Authentication token has expired. Please log in again.")]
    Expired,

    #[error("Malformed authentication token.")]
    Malformed,

    #[error("Authentication token is not active yet. Please try again later.")]
    NotYetValid,

    #[error("Invalid authentication token. Please log in again.")]
    Invalid,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::Malformed => "TOKEN_MALFORMED",
            TokenError::NotYetValid => "TOKEN_NOT_YET_VALID",
            TokenError::Invalid => "TOKEN_INVALID",
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication token missing")]
    MissingToken,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Forbidden: Insufficient privileges")]
    Forbidden,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    // Resource errors
    #[error("{0} not found.")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Validation failed")]
    InvalidFields(FieldErrors),

    // Domain rules
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Review(#[from] ReviewError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    // Startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

impl AppError {
    /// Taxonomy bucket of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingToken | AppError::Token(_) | AppError::InvalidCredentials => {
                ErrorKind::Unauthenticated
            }
            AppError::Forbidden => ErrorKind::Forbidden,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Validation(_) | AppError::InvalidFields(_) => ErrorKind::Validation,
            AppError::Booking(e) => e.kind(),
            AppError::Review(e) => e.kind(),
            AppError::Catalog(e) => e.kind(),
            AppError::Configuration(_) | AppError::Database(_) | AppError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingToken => "TOKEN_MISSING",
            AppError::Token(e) => e.code(),
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) | AppError::InvalidFields(_) => "VALIDATION_ERROR",
            AppError::Booking(e) => e.code(),
            AppError::Review(e) => e.code(),
            AppError::Catalog(e) => e.code(),
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            // Booking and review rule failures, including their lookups, are
            // all reported as bad requests on their endpoints.
            AppError::Booking(_) | AppError::Review(_) => StatusCode::BAD_REQUEST,
            AppError::Catalog(e) if e.kind() == ErrorKind::Conflict => StatusCode::CONFLICT,
            AppError::Catalog(_) => StatusCode::BAD_REQUEST,
            _ => match self.kind() {
                ErrorKind::Validation | ErrorKind::DomainRuleViolation => StatusCode::BAD_REQUEST,
                ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
                ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Hide details for internal errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            message: self.user_message(),
            code: self.code(),
            errors: match self {
                AppError::InvalidFields(fields) => Some(fields),
                _ => None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(entity.to_string()))
    }
}

/// Whether a store error is a unique-constraint violation.
///
/// Components call this to turn a lost insert race into their own
/// domain error instead of leaking the raw store error.
pub fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

/// Convenience constructors
impl AppError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
