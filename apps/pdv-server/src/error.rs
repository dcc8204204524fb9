//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Mini PDV                               │
//! │                                                                         │
//! │  Handler -> Result<T, ApiError>                                        │
//! │         │                                                               │
//! │         ├── JsonRejection        → 422 / 400 / 415                     │
//! │         ├── ValidationError      → 422 VALIDATION_ERROR                │
//! │         ├── NotFound             → 404 NOT_FOUND                       │
//! │         ├── InsufficientStock    → 400 INSUFFICIENT_STOCK              │
//! │         └── DbError (infra)      → 500 DATABASE_ERROR (details logged) │
//! │                                                                         │
//! │  Body: {"code": "NOT_FOUND", "message": "Product 7 not found"}         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pdv_core::CoreError;
use pdv_db::{CheckoutError, DbError};
use serde::Serialize;

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// HTTP status of the response
    #[serde(skip)]
    pub status: StatusCode,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (422)
    ValidationError,

    /// Request could not be read (400, 415)
    BadRequest,

    /// Insufficient stock (400)
    InsufficientStock,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// Default HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::BadRequest | ErrorCode::InsufficientStock => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error with the code's default status.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            status: code.status(),
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} {} not found", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::ConstraintViolation { message } => {
                tracing::warn!("Constraint violation: {}", message);
                ApiError::validation("Request violates a data constraint")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::new(ErrorCode::DatabaseError, "Database is busy")
            }
            DbError::Encoding(e) => {
                tracing::error!("Unreadable stored record: {}", e);
                ApiError::internal("Stored record is unreadable")
            }
            other @ (DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::TransactionFailed(_)
            | DbError::Internal(_)) => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::SaleNotFound(id) => ApiError::not_found("Sale", id),
            e @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, e.to_string())
            }
            e @ CoreError::AmountOverflow { .. } => ApiError::validation(e.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            e @ (CoreError::UnsupportedEncoding { .. } | CoreError::Encoding(_)) => {
                tracing::error!("Line item encoding failed: {}", e);
                ApiError::internal("Line item encoding failed")
            }
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Core(e) => e.into(),
            CheckoutError::Db(e) => e.into(),
        }
    }
}

/// Structural validation failures from the JSON extractor.
///
/// Missing or mistyped fields arrive as 422, malformed JSON as 400 and a
/// missing `Content-Type: application/json` as 415.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let code = if status == StatusCode::UNPROCESSABLE_ENTITY {
            ErrorCode::ValidationError
        } else {
            ErrorCode::BadRequest
        };

        ApiError {
            status,
            code,
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError {
            status: rejection.status(),
            code: ErrorCode::BadRequest,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(&self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
