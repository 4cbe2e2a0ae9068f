//! imdb-api library - IMDB movie REST service
//!
//! Accepts CSV uploads of movie records and answers filtered lookups by
//! year, year range and genre. Every route is served both at the root and
//! under `/imdb`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use imdb_common::config::{AppConfig, Settings};
use imdb_common::MovieStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod error;
pub mod logging;
pub mod services;

/// Path prefix of the original deployment
pub const ROUTE_PREFIX: &str = "/imdb";

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Movie storage gateway
    pub store: Arc<dyn MovieStore>,
    /// `[settings]` section: default year and upload limit
    pub settings: Arc<Settings>,
    /// `[app]` section: endpoint document location
    pub app: Arc<AppConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn MovieStore>, settings: Settings, app: AppConfig) -> Self {
        Self {
            store,
            settings: Arc::new(settings),
            app: Arc::new(app),
        }
    }
}

fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/version", get(api::get_version))
        .route("/endpoints", get(api::get_endpoints))
        .route("/uploadmovies", post(api::upload_movies))
        .route("/movies", get(api::get_movies))
        .merge(api::health_routes())
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.settings.max_upload_bytes()).unwrap_or(usize::MAX);

    Router::new()
        .merge(service_routes())
        .nest(ROUTE_PREFIX, service_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
