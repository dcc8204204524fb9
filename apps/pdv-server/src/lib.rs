//! # Mini PDV Server
//!
//! HTTP surface of the point of sale: product CRUD, atomic checkout and
//! sale history over JSON, plus the static front-end.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HTTP ─► CorsLayer ─► TraceLayer ─► Router                             │
//! │                                        │                                │
//! │                      ┌─────────────────┼─────────────────┐              │
//! │                      ▼                 ▼                 ▼              │
//! │                  AppJson /         NewProduct::     Database            │
//! │                  AppPath           validate()       (pdv-db)            │
//! │                      │                 │                 │              │
//! │                      └──── ApiError {code, message} ◄────┘              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use pdv_db::Database;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ErrorCode};
pub use routes::build_router;

/// Default `EnvFilter` directives when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,pdv=debug,sqlx=warn,tower_http=debug";

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database handle; cloning shares the pool.
    pub db: Database,

    /// Directory behind `/static` and `GET /`.
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db: Database, static_dir: impl Into<PathBuf>) -> Self {
        AppState {
            db,
            static_dir: Arc::new(static_dir.into()),
        }
    }
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, Bytes};
    use axum::http::{header, HeaderMap, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use pdv_db::DbConfig;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app() -> (Router, Database) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let app = build_router(AppState::new(db.clone(), "no-such-static-dir"));
        (app, db)
    }

    async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, _, bytes) = send_raw(app, request).await;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create_product(app: &Router, name: &str, price: f64, stock: i64) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/products",
            Some(json!({"name": name, "price": price, "stock": stock})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "create failed: {body}");
        body["id"].as_i64().unwrap()
    }

    async fn stock_of(app: &Router, id: i64) -> i64 {
        let (_, body) = send(app, Method::GET, &format!("/products/{id}"), None).await;
        body["stock"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let (app, _db) = test_app().await;

        let (status, body) = send(&app, Method::GET, "/ping", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong");
    }

    #[tokio::test]
    async fn test_create_then_list_and_get() {
        let (app, _db) = test_app().await;

        let id = create_product(&app, "Coffee", 10.0, 5).await;

        let (status, body) = send(&app, Method::GET, "/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"id": id, "name": "Coffee", "price": 10.0, "stock": 5}])
        );

        let (status, body) = send(&app, Method::GET, &format!("/products/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Coffee");
    }

    #[tokio::test]
    async fn test_stock_defaults_to_zero() {
        let (app, _db) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/products",
            Some(json!({"name": "Tea", "price": 3.5})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stock"], 0);
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let (app, _db) = test_app().await;
        let id = create_product(&app, "Coffee", 10.0, 5).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/products/{id}"),
            Some(json!({"name": "Dark Coffee", "price": 12.5, "stock": 8})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"id": id, "name": "Dark Coffee", "price": 12.5, "stock": 8})
        );

        let (_, listed) = send(&app, Method::GET, "/products", None).await;
        assert_eq!(listed[0]["name"], "Dark Coffee");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (app, _db) = test_app().await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/products/42",
            Some(json!({"name": "Ghost", "price": 1.0, "stock": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let (app, _db) = test_app().await;
        let id = create_product(&app, "Croissant", 4.0, 3).await;

        let (status, body) = send(&app, Method::DELETE, &format!("/products/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            format!("Product 'Croissant' (ID: {id}) removed successfully")
        );

        let (status, _) = send(&app, Method::GET, &format!("/products/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::DELETE, &format!("/products/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_product_bodies() {
        let (app, _db) = test_app().await;

        let cases = [
            json!({"name": "No price"}),
            json!({"name": "Bad price", "price": "ten"}),
            json!({"name": "Negative", "price": -1.0, "stock": 1}),
            json!({"name": "   ", "price": 1.0, "stock": 1}),
            json!({"name": "Negative stock", "price": 1.0, "stock": -2}),
        ];

        for case in cases {
            let (status, body) = send(&app, Method::POST, "/products", Some(case.clone())).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "accepted {case}");
            assert_eq!(body["code"], "VALIDATION_ERROR");
        }

        let (_, listed) = send(&app, Method::GET, "/products", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_unreadable_requests() {
        let (app, _db) = test_app().await;

        let malformed = Request::builder()
            .method(Method::POST)
            .uri("/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let (status, _, body) = send_raw(&app, malformed).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "BAD_REQUEST");

        let untyped = Request::builder()
            .method(Method::POST)
            .uri("/checkout")
            .body(Body::from("{\"items\": []}"))
            .unwrap();
        let (status, _, _) = send_raw(&app, untyped).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let (status, body) = send(&app, Method::GET, "/products/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_checkout_scenario() {
        let (app, _db) = test_app().await;
        let a = create_product(&app, "A", 10.0, 5).await;
        let b = create_product(&app, "B", 2.5, 0).await;

        let (status, sale) = send(
            &app,
            Method::POST,
            "/checkout",
            Some(json!({"items": [{"product_id": a, "quantity": 2}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sale["total"], 20.0);
        assert_eq!(sale["line_items"][0]["subtotal"], 20.0);
        assert!(sale["created_at"].is_string());

        let document: Value = serde_json::from_str(sale["items"].as_str().unwrap()).unwrap();
        assert_eq!(document["version"], 1);
        assert_eq!(document["items"][0]["name"], "A");
        assert_eq!(document["items"][0]["quantity"], 2);
        assert_eq!(stock_of(&app, a).await, 3);

        let (status, body) = send(
            &app,
            Method::POST,
            "/checkout",
            Some(json!({"items": [
                {"product_id": a, "quantity": 1},
                {"product_id": b, "quantity": 1}
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INSUFFICIENT_STOCK");
        assert!(body["message"].as_str().unwrap().contains('B'));

        assert_eq!(stock_of(&app, a).await, 3);
        assert_eq!(stock_of(&app, b).await, 0);

        let (_, sales) = send(&app, Method::GET, "/sales", None).await;
        assert_eq!(sales.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_amount_overflow_keeps_sales_readable() {
        let (app, _db) = test_app().await;
        let id = create_product(&app, "Gold Bar", 1e308, 10).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/checkout",
            Some(json!({"items": [{"product_id": id, "quantity": 2}]})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(stock_of(&app, id).await, 10);

        let (status, sales) = send(&app, Method::GET, "/sales", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sales, json!([]));
    }

    #[tokio::test]
    async fn test_checkout_accepts_large_cart() {
        let (app, _db) = test_app().await;
        let id = create_product(&app, "Gum", 0.5, 1000).await;
        let items: Vec<Value> = (0..101)
            .map(|_| json!({"product_id": id, "quantity": 1}))
            .collect();

        let (status, sale) = send(&app, Method::POST, "/checkout", Some(json!({"items": items}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(sale["line_items"].as_array().unwrap().len(), 101);
        assert_eq!(stock_of(&app, id).await, 899);
    }

    #[tokio::test]
    async fn test_checkout_rejections() {
        let (app, _db) = test_app().await;
        let id = create_product(&app, "Coffee", 10.0, 5).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/checkout",
            Some(json!({"items": [
                {"product_id": id, "quantity": 1},
                {"product_id": 9999, "quantity": 1}
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product 9999 not found");

        let invalid = [
            json!({"items": []}),
            json!({"items": [{"product_id": id, "quantity": 0}]}),
            json!({"items": [{"product_id": id, "quantity": -4}]}),
            json!({"items": [{"product_id": id}]}),
        ];
        for case in invalid {
            let (status, body) = send(&app, Method::POST, "/checkout", Some(case.clone())).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "accepted {case}");
            assert_eq!(body["code"], "VALIDATION_ERROR");
        }

        assert_eq!(stock_of(&app, id).await, 5);
        let (_, sales) = send(&app, Method::GET, "/sales", None).await;
        assert_eq!(sales, json!([]));
    }

    #[tokio::test]
    async fn test_sales_history() {
        let (app, _db) = test_app().await;
        let id = create_product(&app, "Milk", 4.25, 10).await;

        let (_, first) = send(
            &app,
            Method::POST,
            "/checkout",
            Some(json!({"items": [{"product_id": id, "quantity": 4}]})),
        )
        .await;
        let sale_id = first["id"].as_i64().unwrap();

        let (status, fetched) = send(&app, Method::GET, &format!("/sales/{sale_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["total"], 17.0);
        assert_eq!(fetched["items"], first["items"]);

        let (status, body) = send(&app, Method::GET, "/sales/777", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Sale 777 not found");
    }

    #[tokio::test]
    async fn test_health_reports_database() {
        let (app, db) = test_app().await;

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "database": true}));

        db.close().await;

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["database"], false);
    }

    #[tokio::test]
    async fn test_index_fallback() {
        let (app, _db) = test_app().await;

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, headers, body) = send_raw(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(String::from_utf8_lossy(&body).contains("Mini PDV"));
    }

    #[tokio::test]
    async fn test_static_directory() {
        let dir = std::env::temp_dir().join(format!("pdv-static-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>Storefront</h1>").unwrap();
        std::fs::write(dir.join("script.js"), "console.log('pdv');").unwrap();

        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let app = build_router(AppState::new(db, dir.clone()));

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, _, body) = send_raw(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"<h1>Storefront</h1>");

        let request = Request::builder()
            .uri("/static/script.js")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send_raw(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"console.log('pdv');");

        let request = Request::builder()
            .uri("/static/missing.css")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send_raw(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_cors_preflight_mirrors_origin() {
        let (app, _db) = test_app().await;

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/checkout")
            .header(header::ORIGIN, "http://shop.local")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = send_raw(&app, request).await;

        assert!(status.is_success());
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://shop.local"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }
}
