//! CSV upload endpoint
//!
//! `POST /uploadmovies` with a `multipart/form-data` body whose `file` field
//! holds the CSV. The content type and declared length are checked before
//! the multipart stream is opened; the stream itself is capped by the
//! router's body limit.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, HeaderMap},
    Json,
};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::services::ingest::{ingest_csv, UploadSummary};
use crate::AppState;

/// Multipart field carrying the CSV
const FILE_FIELD: &str = "file";

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().contains("multipart/form-data"))
        .unwrap_or(false)
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// POST /uploadmovies
pub async fn upload_movies(
    State(state): State<AppState>,
    request: Request,
) -> ApiResult<Json<UploadSummary>> {
    let max_bytes = state.settings.max_upload_bytes();

    if !is_multipart(request.headers()) {
        return Err(ApiError::ContentTypeInvalid);
    }

    if let Some(length) = declared_length(request.headers()) {
        if length > max_bytes {
            info!(length, max_bytes, "Rejecting oversized upload");
            return Err(ApiError::FileTooBig { max_bytes });
        }
    }

    let mut multipart = Multipart::from_request(request, &state).await.map_err(|e| {
        info!(error = %e, "Multipart body rejected");
        ApiError::FileTooBig { max_bytes }
    })?;

    let mut data = None;
    loop {
        let field = multipart.next_field().await.map_err(|e| {
            info!(error = %e, "Failed to read multipart body");
            ApiError::FileTooBig { max_bytes }
        })?;

        let Some(field) = field else { break };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            info!(error = %e, "Failed to read uploaded file");
            ApiError::FileTooBig { max_bytes }
        })?;
        info!(file = ?file_name, size = bytes.len(), "Received movie upload");
        data = Some(bytes);
        break;
    }

    let data = data.ok_or(ApiError::InvalidFile)?;
    let summary = ingest_csv(state.store.as_ref(), &data).await?;

    Ok(Json(summary))
}
