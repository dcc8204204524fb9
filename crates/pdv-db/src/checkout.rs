//! # Checkout Engine
//!
//! Converts a checkout request into stock decrements plus exactly one sale,
//! or fails with nothing written.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Database::checkout()                              │
//! │                                                                         │
//! │  validate_checkout_items()          ← 422 before touching the DB       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  checkout_lock.lock()               ← one checkout at a time           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │  ├── SELECT each referenced product (read-only pass)                   │
//! │  ├── plan_checkout()  ✗ → drop tx (ROLLBACK), return error             │
//! │  ├── UPDATE products SET stock = stock - q                             │
//! │  │     WHERE id = ? AND stock >= q   ✗ (0 rows) → ROLLBACK             │
//! │  ├── INSERT INTO sales (total, items, created_at)                      │
//! │  COMMIT                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guarded `UPDATE` keeps stock non-negative even against writers that
//! bypass the in-process lock (another process on the same file, or a
//! product overwrite racing the checkout).

use chrono::Utc;
use pdv_core::checkout::{plan_checkout, referenced_product_ids};
use pdv_core::validation::validate_checkout_items;
use pdv_core::{line_items, CheckoutItem, CoreError, Sale, StockDecrement};
use sqlx::SqliteConnection;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::DbError;
use crate::pool::Database;
use crate::repository::{product, sale};

/// Why a checkout did not produce a sale.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Business rule rejection (validation, unknown product, stock).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure; the transaction was rolled back.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        CheckoutError::Db(err.into())
    }
}

impl Database {
    /// Runs a checkout atomically.
    ///
    /// ## Guarantee
    /// Either every line succeeds and exactly one sale is created with stock
    /// decremented for every line, or no product is mutated and no sale is
    /// created.
    ///
    /// ## Errors
    /// * `CheckoutError::Core(Validation)` - empty request, non-positive quantity
    /// * `CheckoutError::Core(ProductNotFound)` - unknown product id
    /// * `CheckoutError::Core(InsufficientStock)` - a line exceeds stock
    /// * `CheckoutError::Db` - storage failure
    pub async fn checkout(&self, items: &[CheckoutItem]) -> Result<Sale, CheckoutError> {
        validate_checkout_items(items).map_err(CoreError::from)?;

        let _guard = self.checkout_lock().lock().await;

        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut products = Vec::with_capacity(items.len());
        for id in referenced_product_ids(items) {
            if let Some(found) = product::fetch_by_id(&mut tx, id).await? {
                products.push(found);
            }
        }

        let plan = match plan_checkout(items, &products) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(error = %err, lines = items.len(), "Checkout rejected");
                return Err(err.into());
            }
        };

        for decrement in &plan.decrements {
            apply_decrement(&mut tx, decrement).await?;
        }

        let encoded = line_items::encode(&plan.line_items)?;
        let created_at = Utc::now();
        let sale_id = sale::insert_sale(&mut tx, plan.total, &encoded, created_at).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            sale_id = %sale_id,
            total = %plan.total,
            lines = plan.line_items.len(),
            "Checkout completed"
        );

        Ok(Sale {
            id: sale_id,
            total: plan.total,
            line_items: plan.line_items,
            created_at,
        })
    }
}

/// Applies one guarded stock decrement inside the checkout transaction.
///
/// Zero affected rows means the stock changed under us; the caller's
/// transaction is dropped and rolls back every earlier decrement.
async fn apply_decrement(
    conn: &mut SqliteConnection,
    decrement: &StockDecrement,
) -> Result<(), CheckoutError> {
    debug!(
        product_id = %decrement.product_id,
        quantity = %decrement.quantity,
        "Decrementing stock"
    );

    let result = sqlx::query(
        r#"
        UPDATE products
        SET stock = stock - ?2
        WHERE id = ?1 AND stock >= ?2
        "#,
    )
    .bind(decrement.product_id)
    .bind(decrement.quantity)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 1 {
        return Ok(());
    }

    let err = match product::fetch_by_id(conn, decrement.product_id).await? {
        Some(current) => CoreError::InsufficientStock {
            name: current.name,
            available: current.stock,
            requested: decrement.quantity,
        },
        None => CoreError::ProductNotFound(decrement.product_id),
    };
    warn!(error = %err, "Stock changed during checkout");
    Err(err.into())
}

// =============================================================================
// Unit Tests
// =============================================================================
