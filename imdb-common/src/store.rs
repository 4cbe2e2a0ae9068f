//! Storage gateway
//!
//! The ingestion pipeline and the movie lookup only see this trait. The
//! SQLite implementation lives in [`crate::db::movies`].

use async_trait::async_trait;

use crate::models::{MovieRecord, MovieSummary};
use crate::Result;

/// Persistence operations for movies
///
/// Lookups are sorted by rating (highest first) and capped at
/// [`crate::models::LOOKUP_LIMIT`]. Implementations must reject a second
/// movie with the same (title, year) with [`crate::Error::DuplicateMovie`].
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Movies released in `year`, optionally restricted to one genre tag
    async fn find_by_year(&self, year: i32, genre: Option<&str>) -> Result<Vec<MovieSummary>>;

    /// Movies released between `from` and `to` inclusive, optionally restricted to one genre tag
    async fn find_by_year_range(
        &self,
        from: i32,
        to: i32,
        genre: Option<&str>,
    ) -> Result<Vec<MovieSummary>>;

    /// Insert a movie, returning its assigned identifier
    async fn insert(&self, movie: &MovieRecord) -> Result<String>;

    /// Number of stored movies
    async fn count(&self) -> Result<i64>;

    /// Remove every stored movie (administrative/test use only)
    async fn clean(&self) -> Result<u64>;
}
