//! # Domain Types
//!
//! Core domain types used throughout Mini PDV.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  product_id     │       │
//! │  │  name           │   │  total          │   │  name (frozen)  │       │
//! │  │  price          │   │  line_items ───────►│  quantity       │       │
//! │  │  stock          │   │  created_at     │   │  unit_price     │       │
//! │  └─────────────────┘   └─────────────────┘   │  subtotal       │       │
//! │                                              └─────────────────┘       │
//! │  Request payloads:                                                      │
//! │  NewProduct { name, price, stock }                                      │
//! │  CheckoutRequest { items: [CheckoutItem { product_id, quantity }] }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are integers assigned by the store on insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::line_items;
use crate::validation::{validate_price, validate_product_name, validate_stock};

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name, copied onto line items at sale time.
    pub name: String,

    /// Unit price.
    pub price: f64,

    /// Quantity on hand. Never negative.
    pub stock: i64,
}

impl Product {
    /// Checks whether `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// Payload for creating or fully overwriting a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
}

impl NewProduct {
    /// Runs field validation on every mutable field.
    pub fn validate(&self) -> CoreResult<()> {
        validate_product_name(&self.name)?;
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        Ok(())
    }
}

// =============================================================================
// Checkout Request
// =============================================================================

/// One requested line of a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// A checkout request: ordered list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

// =============================================================================
// Line Item
// =============================================================================

/// A line of a completed sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub name: String,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub unit_price: f64,
    /// unit_price × quantity.
    pub subtotal: f64,
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub total: f64,
    pub line_items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the line items in their stored, versioned encoding.
    pub fn encoded_items(&self) -> CoreResult<String> {
        line_items::encode(&self.line_items)
    }

    /// Sum of line subtotals. Equals `total` for every stored sale.
    pub fn line_total(&self) -> f64 {
        self.line_items.iter().map(|item| item.subtotal).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
