//! Movie persistence on SQLite

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::warn;
use uuid::Uuid;

use crate::models::{MovieRecord, MovieSummary, LOOKUP_LIMIT};
use crate::store::MovieStore;
use crate::{Error, Result};

const SUMMARY_COLUMNS: &str = "title, genre, description, year, runtime_min, rating";

// Genre filter matches one element of the JSON tag array exactly
const GENRE_FILTER: &str =
    "EXISTS (SELECT 1 FROM json_each(movies.genre) WHERE json_each.value = ?)";

/// `MovieStore` backed by a SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteMovieStore {
    pool: SqlitePool,
}

impl SqliteMovieStore {
    /// Wrap an initialized pool (see [`crate::db::init_database`])
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn summary_from_row(row: &SqliteRow) -> Result<MovieSummary> {
    let genre_json: String = row.try_get("genre")?;
    Ok(MovieSummary {
        title: row.try_get("title")?,
        genre: serde_json::from_str(&genre_json)?,
        description: row.try_get("description")?,
        year: row.try_get("year")?,
        runtime_min: row.try_get("runtime_min")?,
        rating: row.try_get("rating")?,
    })
}

fn lookup_sql(year_condition: &str, with_genre: bool) -> String {
    let genre_clause = if with_genre {
        format!(" AND {}", GENRE_FILTER)
    } else {
        String::new()
    };
    format!(
        "SELECT {} FROM movies WHERE {}{} ORDER BY rating DESC, rowid ASC LIMIT ?",
        SUMMARY_COLUMNS, year_condition, genre_clause
    )
}

#[async_trait]
impl MovieStore for SqliteMovieStore {
    async fn find_by_year(&self, year: i32, genre: Option<&str>) -> Result<Vec<MovieSummary>> {
        let sql = lookup_sql("year = ?", genre.is_some());
        let mut query = sqlx::query(&sql).bind(year);
        if let Some(genre) = genre {
            query = query.bind(genre);
        }
        let rows = query.bind(LOOKUP_LIMIT).fetch_all(&self.pool).await?;

        rows.iter().map(summary_from_row).collect()
    }

    async fn find_by_year_range(
        &self,
        from: i32,
        to: i32,
        genre: Option<&str>,
    ) -> Result<Vec<MovieSummary>> {
        let sql = lookup_sql("year >= ? AND year <= ?", genre.is_some());
        let mut query = sqlx::query(&sql).bind(from).bind(to);
        if let Some(genre) = genre {
            query = query.bind(genre);
        }
        let rows = query.bind(LOOKUP_LIMIT).fetch_all(&self.pool).await?;

        rows.iter().map(summary_from_row).collect()
    }

    async fn insert(&self, movie: &MovieRecord) -> Result<String> {
        let guid = Uuid::new_v4().to_string();
        let genre_json = serde_json::to_string(&movie.genre)?;

        let result = sqlx::query(
            r#"
            INSERT INTO movies (
                guid, movie_rank, title, genre, description, director, actors,
                year, runtime_min, rating, votes, revenue_mil, metascore
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&guid)
        .bind(movie.rank)
        .bind(&movie.title)
        .bind(&genre_json)
        .bind(&movie.description)
        .bind(&movie.director)
        .bind(&movie.actors)
        .bind(movie.year)
        .bind(movie.runtime_min)
        .bind(movie.rating)
        .bind(movie.votes)
        .bind(movie.revenue_mil)
        .bind(movie.metascore)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(guid),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::DuplicateMovie {
                    title: movie.title.clone(),
                    year: movie.year,
                })
            }
            Err(e) => Err(Error::Database(e)),
        }
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn clean(&self) -> Result<u64> {
        warn!("Cleaning movie database");
        let result = sqlx::query("DELETE FROM movies").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_sql_without_genre() {
        let sql = lookup_sql("year = ?", false);
        assert!(sql.contains("WHERE year = ? ORDER BY rating DESC"));
        assert!(!sql.contains("json_each"));
        assert!(sql.ends_with("LIMIT ?"));
    }

    #[test]
    fn test_lookup_sql_with_genre() {
        let sql = lookup_sql("year >= ? AND year <= ?", true);
        assert!(sql.contains("year >= ? AND year <= ? AND EXISTS"));
        assert!(sql.contains("json_each(movies.genre)"));
    }
}
