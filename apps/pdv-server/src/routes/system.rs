//! Landing page, ping and health checks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, warn};

use crate::AppState;

/// Served at `/` when the static directory has no `index.html`.
const FALLBACK_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Mini PDV - Backend Online</title>
</head>
<body>
    <h1>Mini PDV backend is running</h1>
    <p>The API is up, but no <code>index.html</code> was found in the static directory.</p>
    <ul>
        <li><a href="/products">Products (JSON)</a></li>
        <li><a href="/sales">Sales (JSON)</a></li>
        <li><a href="/health">Health</a></li>
    </ul>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Response {
    let path = state.static_dir.join("index.html");

    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Serving fallback index");
            Html(FALLBACK_INDEX).into_response()
        }
    }
}

/// `GET /ping`
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong",
        status: "API running",
    })
}

/// `GET /health`
///
/// 503 when the database does not answer.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: true,
            }),
        )
    } else {
        warn!("Health check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database: false,
            }),
        )
    }
}
