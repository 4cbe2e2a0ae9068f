//! Database initialization
//!
//! Opens (or creates) the SQLite database file and makes sure the movies
//! table and its indexes exist. Safe to run on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Open the database at `db_path`, creating the file and schema if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets lookups proceed while an upload is inserting
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_movies_table(&pool).await?;

    Ok(pool)
}

/// Create the movies table and its indexes (idempotent)
///
/// `genre` holds a JSON array of lower-cased tags. The unique index on
/// (title, year) is what rejects duplicate uploads.
pub async fn create_movies_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS movies (
            guid TEXT PRIMARY KEY,
            movie_rank INTEGER NOT NULL,
            title TEXT NOT NULL,
            genre TEXT NOT NULL DEFAULT '[]',
            description TEXT NOT NULL DEFAULT '',
            director TEXT NOT NULL DEFAULT '',
            actors TEXT NOT NULL DEFAULT '',
            year INTEGER NOT NULL,
            runtime_min INTEGER NOT NULL,
            rating REAL NOT NULL,
            votes INTEGER NOT NULL,
            revenue_mil REAL NOT NULL DEFAULT 0,
            metascore INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_movies_title_year ON movies (title, year)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_movies_year_rating ON movies (year, rating DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_database_file_and_parent() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("nested").join("movies.db");

        let pool = init_database(&db_path).await.unwrap();
        assert!(db_path.exists());

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='movies')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(exists);
    }

    #[tokio::test]
    async fn test_schema_creation_idempotent() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("movies.db");

        let pool = init_database(&db_path).await.unwrap();
        create_movies_table(&pool).await.unwrap();
        drop(pool);

        // Reopening an existing database must not fail
        let pool = init_database(&db_path).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
