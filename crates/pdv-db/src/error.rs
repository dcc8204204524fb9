//! # Store Errors
//!
//! ```text
//! sqlx::Error ──► DbError ──► ApiError (pdv-server)
//!                    ▲
//! CoreError ─────────┘  (only line-item decoding failures)
//! ```
//!
//! SQLite reports the kind of a constraint failure only in the message text
//! (`"CHECK constraint failed: stock >= 0"`), so the conversion below matches
//! on that text.

use pdv_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// No row with this id.
    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: String },

    /// A `CHECK` or `NOT NULL` rule rejected the write, e.g. a negative
    /// stock or a blank product name that skipped validation.
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// `BEGIN` or `COMMIT` failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// No pooled connection became free within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored column could not be decoded (the sale line-item document).
    #[error("Stored record is unreadable: {0}")]
    Encoding(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// `DbError::not_found("Product", 7)` renders as `Product 7 not found`.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.starts_with("CHECK constraint failed")
                    || msg.starts_with("NOT NULL constraint failed")
                {
                    DbError::ConstraintViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<CoreError> for DbError {
    fn from(err: CoreError) -> Self {
        DbError::Encoding(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
