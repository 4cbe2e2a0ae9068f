//! Service identification endpoint

use axum::Json;
use serde::Serialize;

/// Service name reported by `/version`
pub const SERVICE_NAME: &str = "IMDB Movie REST Service";

/// Version response
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: String,
    pub version: String,
}

/// GET /version
pub async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
