//! HTTP error taxonomy for imdb-api
//!
//! Every failure a client can see is one variant of [`ApiError`]. The
//! variant decides both the status code and the message; the JSON body is
//! always `{"error": <message>, "code": "<status>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::services::ingest::IngestError;
use crate::services::query::QueryError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Multipart body did not contain a usable `file` field
    #[error("Invalid File")]
    InvalidFile,

    /// First CSV line did not have the expected shape
    #[error("Invalid File Format")]
    InvalidFileFormat,

    /// Request body exceeded the upload limit
    #[error("File is too large. Maximum upload size is {max_bytes} Bytes")]
    FileTooBig { max_bytes: u64 },

    /// Upload was not sent as multipart/form-data
    #[error("Please upload file as multipart/form-data with \"file\" as key")]
    ContentTypeInvalid,

    /// `year` combined with `year_from`/`year_to`
    #[error("Please provide either the year or a range but not both")]
    YearAndRange,

    /// Incomplete or reversed year range
    #[error("Please provide a valid year_from and year_to in chronological order")]
    YearRangeInvalid,

    /// Year filter is not a 4-digit number
    #[error("Please provide a valid year")]
    YearInvalid,

    /// Genre filter present but empty
    #[error("Please provide a valid genre")]
    GenreInvalid,

    /// Unexpected failure; the detail is logged, never returned
    #[error("Internal Server Error")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidFile
            | ApiError::InvalidFileFormat
            | ApiError::FileTooBig { .. }
            | ApiError::YearAndRange
            | ApiError::YearRangeInvalid
            | ApiError::YearInvalid
            | ApiError::GenreInvalid => StatusCode::BAD_REQUEST,
            ApiError::ContentTypeInvalid => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::GenreInvalid => ApiError::GenreInvalid,
            QueryError::YearAndRange => ApiError::YearAndRange,
            QueryError::YearInvalid => ApiError::YearInvalid,
            QueryError::RangeInvalid => ApiError::YearRangeInvalid,
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::InvalidFormat(_) => ApiError::InvalidFileFormat,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref detail) = self {
            error!(error = %detail, "Internal error");
        }

        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16().to_string(),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        for err in [
            ApiError::InvalidFile,
            ApiError::InvalidFileFormat,
            ApiError::FileTooBig { max_bytes: 1 },
            ApiError::YearAndRange,
            ApiError::YearRangeInvalid,
            ApiError::YearInvalid,
            ApiError::GenreInvalid,
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{:?}", err);
        }
    }

    #[test]
    fn test_content_type_is_unsupported_media_type() {
        assert_eq!(
            ApiError::ContentTypeInvalid.status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[test]
    fn test_file_too_big_message_includes_limit() {
        let err = ApiError::FileTooBig { max_bytes: 2097152 };
        assert_eq!(
            err.to_string(),
            "File is too large. Maximum upload size is 2097152 Bytes"
        );
    }

    #[test]
    fn test_internal_hides_detail() {
        let err = ApiError::Internal("disk on fire".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn test_query_error_mapping() {
        assert!(matches!(
            ApiError::from(QueryError::RangeInvalid),
            ApiError::YearRangeInvalid
        ));
        assert!(matches!(
            ApiError::from(QueryError::GenreInvalid),
            ApiError::GenreInvalid
        ));
    }
}
