//! Endpoint description document
//!
//! Serves the configured YAML file verbatim. The file is read on every
//! request so it can be edited without a restart.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Content type used for the endpoint document
const ENDPOINTS_CONTENT_TYPE: &str = "application/text";

/// GET /endpoints
pub async fn get_endpoints(State(state): State<AppState>) -> ApiResult<Response> {
    let path = &state.app.endpoints_file;
    let content = tokio::fs::read(path).await.map_err(|e| {
        ApiError::Internal(format!(
            "Failed to read endpoint document {}: {}",
            path.display(),
            e
        ))
    })?;

    Ok(([(header::CONTENT_TYPE, ENDPOINTS_CONTENT_TYPE)], content).into_response())
}
