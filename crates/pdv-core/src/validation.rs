//! # Validation Module
//!
//! Field validation for Mini PDV request payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum Json)                                   │
//! │  ├── Missing fields, wrong types → 422                                 │
//! │  └── Malformed JSON → 400                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Non-empty names, non-negative prices and stock                    │
//! │  └── Positive checkout quantities                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (stock >= 0)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::CheckoutItem;
use crate::MAX_PRODUCT_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use pdv_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Coffee 500g").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative; zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use pdv_core::validation::validate_price;
///
/// assert!(validate_price(10.99).is_ok());
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-1.0).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a checkout quantity.
///
/// A zero or negative quantity would turn a sale into a restock, so it is
/// rejected before any lookup happens.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the lines of a checkout request.
///
/// ## Rules
/// - At least one line
/// - Every quantity positive
pub fn validate_checkout_items(items: &[CheckoutItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    for item in items {
        validate_quantity(item.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Coffee 500g").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(10.99).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(12).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_checkout_items() {
        let line = |quantity| CheckoutItem {
            product_id: 1,
            quantity,
        };

        assert!(validate_checkout_items(&[line(1), line(3)]).is_ok());
        assert!(validate_checkout_items(&[]).is_err());
        assert!(validate_checkout_items(&[line(1), line(0)]).is_err());
        assert!(validate_checkout_items(&[line(-2)]).is_err());
        assert!(validate_checkout_items(&vec![line(1); 250]).is_ok());
    }
}
