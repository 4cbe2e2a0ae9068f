//! # IMDB Common Library
//!
//! Shared code for the IMDB movie service:
//! - Movie record model and lookup projection
//! - Storage gateway trait and its SQLite implementation
//! - TOML configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use error::{Error, Result};
pub use models::{MovieRecord, MovieSummary};
pub use store::MovieStore;
