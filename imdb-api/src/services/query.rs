//! Movie lookup query resolution
//!
//! Turns the raw `/movies` query parameters into exactly one store query
//! (single year or year range, optionally narrowed by genre) or a
//! validation rejection. Rules are checked in this order:
//!
//! 1. `genre` present but empty → invalid genre
//! 2. `year` together with `year_from`/`year_to` → year and range both given
//! 3. no year filter at all → configured default year
//! 4. `year` → must be a 4-digit number
//! 5. `year_from` + `year_to` → both 4-digit numbers, in chronological order
//! 6. only one range bound → invalid range

use imdb_common::config::Settings;
use imdb_common::{MovieStore, MovieSummary, Result};
use thiserror::Error;

/// Raw `/movies` filters, exactly as received
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilters {
    pub genre: Option<String>,
    pub year: Option<String>,
    pub year_from: Option<String>,
    pub year_to: Option<String>,
}

impl MovieFilters {
    /// Collect filters from decoded query pairs
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filters = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "genre" => &mut filters.genre,
                "year" => &mut filters.year,
                "year_from" => &mut filters.year_from,
                "year_to" => &mut filters.year_to,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        filters
    }
}

/// A validated store query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    Year { year: i32, genre: Option<String> },
    Range { from: i32, to: i32, genre: Option<String> },
}

/// Reasons a set of filters is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("genre filter is empty")]
    GenreInvalid,

    #[error("year and year range both provided")]
    YearAndRange,

    #[error("year is not a 4-digit number")]
    YearInvalid,

    #[error("year range is incomplete or not in chronological order")]
    RangeInvalid,
}

impl MovieQuery {
    /// Genre restriction, if any
    pub fn genre(&self) -> Option<&str> {
        match self {
            MovieQuery::Year { genre, .. } | MovieQuery::Range { genre, .. } => genre.as_deref(),
        }
    }

    /// Execute against the store
    pub async fn run(&self, store: &dyn MovieStore) -> Result<Vec<MovieSummary>> {
        match self {
            MovieQuery::Year { year, genre } => store.find_by_year(*year, genre.as_deref()).await,
            MovieQuery::Range { from, to, genre } => {
                store.find_by_year_range(*from, *to, genre.as_deref()).await
            }
        }
    }
}

/// Parse a year filter: exactly four ASCII digits
pub fn parse_year(value: &str) -> std::result::Result<i32, QueryError> {
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QueryError::YearInvalid);
    }
    value.parse().map_err(|_| QueryError::YearInvalid)
}

/// Resolve filters into a single query
pub fn resolve(
    filters: &MovieFilters,
    settings: &Settings,
) -> std::result::Result<MovieQuery, QueryError> {
    let genre = match filters.genre.as_deref() {
        Some("") => return Err(QueryError::GenreInvalid),
        Some(genre) => Some(genre.to_lowercase()),
        None => None,
    };

    match (
        filters.year.as_deref(),
        filters.year_from.as_deref(),
        filters.year_to.as_deref(),
    ) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(QueryError::YearAndRange),
        (None, None, None) => Ok(MovieQuery::Year {
            year: settings.default_year,
            genre,
        }),
        (Some(year), None, None) => Ok(MovieQuery::Year {
            year: parse_year(year)?,
            genre,
        }),
        (None, Some(from), Some(to)) => {
            let from = parse_year(from)?;
            let to = parse_year(to)?;
            if from > to {
                return Err(QueryError::RangeInvalid);
            }
            Ok(MovieQuery::Range { from, to, genre })
        }
        (None, Some(_), None) | (None, None, Some(_)) => Err(QueryError::RangeInvalid),
    }
}
