//! # HTTP Routes
//!
//! ```text
//! GET    /                 index.html or fallback page
//! GET    /ping             liveness
//! GET    /health           liveness + database check
//! GET    /products         list
//! POST   /products         create
//! GET    /products/{id}    read
//! PUT    /products/{id}    overwrite
//! DELETE /products/{id}    delete
//! POST   /checkout         atomic sale
//! GET    /sales            list
//! GET    /sales/{id}       read
//! GET    /static/*         files from the static directory
//! ```

pub mod products;
pub mod sales;
pub mod system;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Builds the application router with CORS, tracing and static files.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&*state.static_dir);

    Router::new()
        .route("/", get(system::index))
        .route("/ping", get(system::ping))
        .route("/health", get(system::health))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/checkout", post(sales::checkout))
        .route("/sales", get(sales::list_sales))
        .route("/sales/{id}", get(sales::get_sale))
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
