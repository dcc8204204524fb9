//! # Checkout Planning
//!
//! Turns a checkout request into a [`CheckoutPlan`] without touching storage.
//!
//! ## Validate-Then-Apply
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Pipeline                                  │
//! │                                                                         │
//! │  Request [{A, 2}, {B, 1}, {A, 1}]                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_checkout_items()   ← non-empty, quantities > 0               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_checkout() (THIS MODULE, read-only)                              │
//! │  ├── line 1: A found, stock 5 ≥ 2        ✓                             │
//! │  ├── line 2: B found, stock 0 < 1        ✗ → InsufficientStock         │
//! │  └── (stop: nothing has been mutated)                                  │
//! │       │                                                                 │
//! │       ▼  (only when every line passed)                                 │
//! │  CheckoutPlan { line_items, total, decrements: [A: 3, B: 1] }          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pdv-db applies every decrement + inserts the sale in ONE transaction  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repeated lines for the same product are checked against stock using their
//! cumulative quantity, and produce a single decrement.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{CheckoutItem, LineItem, Product};
use crate::validation::validate_checkout_items;

/// Stock to remove from one product when the plan is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDecrement {
    pub product_id: i64,
    pub quantity: i64,
}

/// The fully validated outcome of a checkout, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPlan {
    /// One entry per request line, in request order.
    pub line_items: Vec<LineItem>,
    /// Sum of every line subtotal.
    pub total: f64,
    /// One entry per distinct product, in first-seen order.
    pub decrements: Vec<StockDecrement>,
}

/// Returns the distinct product ids referenced by a request, in request order.
pub fn referenced_product_ids(items: &[CheckoutItem]) -> Vec<i64> {
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        if !ids.contains(&item.product_id) {
            ids.push(item.product_id);
        }
    }
    ids
}

/// Plans a checkout against a snapshot of the referenced products.
///
/// ## Errors
/// * `CoreError::Validation` - empty request or non-positive quantity
/// * `CoreError::ProductNotFound` - first line whose product is absent
/// * `CoreError::InsufficientStock` - first line whose cumulative quantity
///   exceeds the product's stock
/// * `CoreError::AmountOverflow` - a subtotal or the total is not finite
///
/// Lines are checked in request order, so the reported error is always the
/// earliest failing line.
pub fn plan_checkout(items: &[CheckoutItem], products: &[Product]) -> CoreResult<CheckoutPlan> {
    validate_checkout_items(items)?;

    let by_id: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let mut line_items = Vec::with_capacity(items.len());
    let mut total = 0.0;
    let mut decrements: Vec<StockDecrement> = Vec::new();

    for item in items {
        let product = by_id
            .get(&item.product_id)
            .ok_or(CoreError::ProductNotFound(item.product_id))?;

        let position = match decrements
            .iter()
            .position(|d| d.product_id == product.id)
        {
            Some(position) => position,
            None => {
                decrements.push(StockDecrement {
                    product_id: product.id,
                    quantity: 0,
                });
                decrements.len() - 1
            }
        };

        let requested = decrements[position].quantity.saturating_add(item.quantity);
        if !product.can_sell(requested) {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested,
            });
        }
        decrements[position].quantity = requested;

        let subtotal = product.price * item.quantity as f64;
        total += subtotal;
        if !subtotal.is_finite() || !total.is_finite() {
            return Err(CoreError::AmountOverflow {
                name: product.name.clone(),
            });
        }

        line_items.push(LineItem {
            product_id: product.id,
            name: product.name.clone(),
            quantity: item.quantity,
            unit_price: product.price,
            subtotal,
        });
    }

    Ok(CheckoutPlan {
        line_items,
        total,
        decrements,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
