//! # Checkout and Sale Handlers

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use pdv_core::{CheckoutRequest, CoreError, LineItem, Sale};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::extract::{AppJson, AppPath};
use crate::AppState;

/// Sale as returned over HTTP.
///
/// `items` carries the stored line-item document as a string; `line_items`
/// carries the same records structured.
#[derive(Debug, Clone, Serialize)]
pub struct SaleResponse {
    pub id: i64,
    pub total: f64,
    pub items: String,
    pub line_items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<Sale> for SaleResponse {
    type Error = CoreError;

    fn try_from(sale: Sale) -> Result<Self, Self::Error> {
        let items = sale.encoded_items()?;
        Ok(SaleResponse {
            id: sale.id,
            total: sale.total,
            items,
            line_items: sale.line_items,
            created_at: sale.created_at,
        })
    }
}

/// `POST /checkout`
pub async fn checkout(
    State(state): State<AppState>,
    AppJson(request): AppJson<CheckoutRequest>,
) -> Result<Json<SaleResponse>, ApiError> {
    debug!(lines = request.items.len(), "checkout");
    let sale = state.db.checkout(&request.items).await?;
    Ok(Json(SaleResponse::try_from(sale)?))
}

/// `GET /sales`
pub async fn list_sales(State(state): State<AppState>) -> Result<Json<Vec<SaleResponse>>, ApiError> {
    debug!("list_sales");
    let sales = state
        .db
        .sales()
        .list_all()
        .await?
        .into_iter()
        .map(SaleResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(sales))
}

/// `GET /sales/{id}`
pub async fn get_sale(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<SaleResponse>, ApiError> {
    debug!(sale_id = %id, "get_sale");
    let sale = state
        .db
        .sales()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::SaleNotFound(id))?;
    Ok(Json(SaleResponse::try_from(sale)?))
}
