//! # Sale Repository
//!
//! Read access to completed sales.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── Database::checkout() → one row per successful checkout         │
//! │                                                                         │
//! │  2. READ                                                               │
//! │     └── list_all() / get_by_id()                                       │
//! │                                                                         │
//! │  Sales are never updated or deleted.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use pdv_core::{line_items, Sale};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Raw `sales` row; `items` holds the versioned line-item document.
#[derive(Debug, sqlx::FromRow)]
pub struct SaleRow {
    id: i64,
    total: f64,
    items: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SaleRow> for Sale {
    type Error = DbError;

    fn try_from(row: SaleRow) -> DbResult<Self> {
        Ok(Sale {
            id: row.id,
            total: row.total,
            line_items: line_items::decode(&row.items)?,
            created_at: row.created_at,
        })
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Lists every sale, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, total, items, created_at
            FROM sales
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed sales");
        rows.into_iter().map(Sale::try_from).collect()
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let row = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, total, items, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Sale::try_from).transpose()
    }

    /// Counts total sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Inserts a sale row on the checkout transaction and returns its id.
pub(crate) async fn insert_sale(
    conn: &mut SqliteConnection,
    total: f64,
    items: &str,
    created_at: DateTime<Utc>,
) -> DbResult<i64> {
    debug!(total = %total, "Inserting sale");

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO sales (total, items, created_at)
        VALUES (?1, ?2, ?3)
        RETURNING id
        "#,
    )
    .bind(total)
    .bind(items)
    .bind(created_at)
    .fetch_one(&mut *conn)
    .await?;

    Ok(id)
}
