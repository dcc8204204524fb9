//! # Product Repository
//!
//! Database operations for products: list, lookup, create, overwrite and
//! permanent delete. Stock decrements for sales live in
//! [`crate::checkout`], inside the checkout transaction.

use pdv_core::{NewProduct, Product};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let created = repo.insert(&NewProduct { name: "Coffee".into(), price: 10.0, stock: 5 }).await?;
/// let product = repo.get_by_id(created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, ordered by id. No filter, no pagination.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, stock
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let mut conn = self.pool.acquire().await?;
        fetch_by_id(&mut conn, id).await
    }

    /// Inserts a new product and returns it with its assigned id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, stock)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, price, stock
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Overwrites every mutable field of an existing product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The row as stored after the update
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: i64, product: &NewProduct) -> DbResult<Product> {
        debug!(id = %id, "Updating product");

        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = ?2,
                price = ?3,
                stock = ?4
            WHERE id = ?1
            RETURNING id, name, price, stock
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Permanently deletes a product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The deleted row (for confirmation messages)
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    ///
    /// Past sales keep their own copy of the product name and price, so
    /// deletion never touches sale history.
    pub async fn delete(&self, id: i64) -> DbResult<Product> {
        debug!(id = %id, "Deleting product");

        let deleted = sqlx::query_as::<_, Product>(
            r#"
            DELETE FROM products
            WHERE id = ?1
            RETURNING id, name, price, stock
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        deleted.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Fetches one product on an already-acquired connection or transaction.
pub(crate) async fn fetch_by_id(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, price, stock
        FROM products
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(product)
}

// =============================================================================
// Unit Tests
// =============================================================================
