//! # Domain Errors
//!
//! `ValidationError` describes a bad field; `CoreError` describes a request
//! the store cannot honor. `pdv-db` wraps both in `CheckoutError` and the
//! server turns them into `{code, message}` bodies.

use thiserror::Error;

/// Business rule failures.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Product {0} not found")]
    ProductNotFound(i64),

    #[error("Sale {0} not found")]
    SaleNotFound(i64),

    /// `requested` is the cumulative quantity of every line naming the
    /// product, not just the line that tipped it over.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A line subtotal or the running total left the finite `f64` range.
    #[error("Sale amount for {name} is too large to record")]
    AmountOverflow { name: String },

    /// Stored line-item document uses a version this build cannot read.
    #[error("Unsupported line item encoding version {version}")]
    UnsupportedEncoding { version: u32 },

    /// Line-item document could not be encoded or decoded.
    #[error("Line item encoding error: {0}")]
    Encoding(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Encoding(err.to_string())
    }
}

/// Field-level rejection, raised before any stock is read. Served as 422.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Missing, blank or empty.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// NaN or infinite prices land here.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Coffee".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Coffee: available 3, requested 5"
        );

        assert_eq!(CoreError::ProductNotFound(42).to_string(), "Product 42 not found");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        };
        assert_eq!(err.to_string(), "stock must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "items".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
