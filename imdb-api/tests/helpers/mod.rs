//! Test helper utilities
//!
//! Shared setup for the imdb-api HTTP tests: a router backed by a real
//! SQLite file in a temporary directory, plus request builders.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use imdb_api::{build_router, AppState};
use imdb_common::config::{AppConfig, Settings};
use imdb_common::db::{init_database, SqliteMovieStore};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const BOUNDARY: &str = "imdb-test-boundary";

/// Router plus the resources it depends on
pub struct TestApp {
    /// Keeps the database and endpoint document alive
    pub dir: TempDir,
    pub store: Arc<SqliteMovieStore>,
    pub router: Router,
}

/// Default settings: 2016 as default year, 2 MiB upload limit
pub fn test_settings() -> Settings {
    Settings {
        default_year: 2016,
        file_size_kb: 2048,
    }
}

pub async fn setup_app() -> TestApp {
    setup_app_with(test_settings()).await
}

pub async fn setup_app_with(settings: Settings) -> TestApp {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("movies.db")).await.unwrap();
    let store = Arc::new(SqliteMovieStore::new(pool));

    let app = AppConfig {
        endpoints_file: dir.path().join("swagger.yaml"),
        ..AppConfig::default()
    };

    let state = AppState::new(store.clone(), settings, app);
    TestApp {
        dir,
        store,
        router: build_router(state),
    }
}

impl TestApp {
    /// Location the endpoint document is served from
    pub fn endpoints_file(&self) -> PathBuf {
        self.dir.path().join("swagger.yaml")
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Encode `data` as the `file` field of a multipart body
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Multipart upload request without a `Content-Length` header
pub fn upload(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Multipart upload of `data` as `file` to `/uploadmovies`
pub fn upload_csv(data: &[u8]) -> Request<Body> {
    upload("/uploadmovies", multipart_body("file", "movies.csv", data))
}

pub async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

pub async fn extract_json(body: Body) -> Value {
    let bytes = body_bytes(body).await;
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
