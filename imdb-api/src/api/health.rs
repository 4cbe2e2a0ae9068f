//! Liveness probe for imdb-api
//!
//! Answers without touching the movie store, so it stays cheap for load
//! balancers and stays up even when SQLite is busy with an upload.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Module name reported in health responses
const MODULE_NAME: &str = "imdb-api";

/// `{status, module, version}` payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: MODULE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Routes mounted at the root and under `/imdb`
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
