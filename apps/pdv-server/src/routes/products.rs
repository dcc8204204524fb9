//! # Product Handlers
//!
//! CRUD over the product catalog. Bodies are validated twice: structurally
//! by [`AppJson`] and per field by [`NewProduct::validate`].

use axum::extract::State;
use axum::Json;
use pdv_core::{NewProduct, Product};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::extract::{AppJson, AppPath};
use crate::AppState;

/// Confirmation body for destructive operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `GET /products`
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    debug!("list_products");
    let products = state.db.products().list_all().await?;
    Ok(Json(products))
}

/// `GET /products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Product>, ApiError> {
    debug!(product_id = %id, "get_product");
    state
        .db
        .products()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", id))
}

/// `POST /products`
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewProduct>,
) -> Result<Json<Product>, ApiError> {
    payload.validate()?;

    let product = state.db.products().insert(&payload).await?;
    info!(product_id = %product.id, name = %product.name, "Product created");

    Ok(Json(product))
}

/// `PUT /products/{id}`
///
/// Overwrites every mutable field.
pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<NewProduct>,
) -> Result<Json<Product>, ApiError> {
    payload.validate()?;

    let product = state.db.products().update(id, &payload).await?;
    info!(product_id = %product.id, stock = product.stock, "Product updated");

    Ok(Json(product))
}

/// `DELETE /products/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state.db.products().delete(id).await?;
    info!(product_id = %deleted.id, name = %deleted.name, "Product deleted");

    Ok(Json(MessageResponse {
        message: format!(
            "Product '{}' (ID: {}) removed successfully",
            deleted.name, deleted.id
        ),
    }))
}
