//! Movie record model
//!
//! `MovieRecord` is the write-side shape built from one CSV line.
//! `MovieSummary` is the projection returned by lookups.

use serde::{Deserialize, Serialize};

/// Number of columns in an upload CSV record
pub const CSV_FIELD_COUNT: usize = 12;

/// Maximum number of movies returned by a lookup
pub const LOOKUP_LIMIT: i64 = 10;

/// A complete movie as stored by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub rank: i32,
    pub title: String,
    /// Lower-cased genre tags, in source order
    pub genre: Vec<String>,
    pub description: String,
    pub director: String,
    pub actors: String,
    pub year: i32,
    pub runtime_min: i32,
    pub rating: f64,
    pub votes: i64,
    /// Zero when the source field was empty
    pub revenue_mil: f64,
    /// Zero when the source field was empty
    pub metascore: i32,
}

/// Lookup projection of a stored movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub title: String,
    pub genre: Vec<String>,
    pub description: String,
    pub year: i32,
    pub runtime_min: i32,
    pub rating: f64,
}

impl From<&MovieRecord> for MovieSummary {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            title: movie.title.clone(),
            genre: movie.genre.clone(),
            description: movie.description.clone(),
            year: movie.year,
            runtime_min: movie.runtime_min,
            rating: movie.rating,
        }
    }
}

/// Split a comma-separated genre field into lower-cased, trimmed tags
pub fn split_genres(field: &str) -> Vec<String> {
    field
        .to_lowercase()
        .split(',')
        .map(|tag| tag.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_genres_lowercases_and_trims() {
        assert_eq!(
            split_genres("Action, Adventure,Sci-Fi"),
            vec!["action", "adventure", "sci-fi"]
        );
    }

    #[test]
    fn test_split_genres_single_tag() {
        assert_eq!(split_genres("Drama"), vec!["drama"]);
    }

    #[test]
    fn test_summary_projection_drops_popularity_fields() {
        let movie = MovieRecord {
            rank: 1,
            title: "Guardians of the Galaxy".to_string(),
            genre: vec!["action".to_string(), "adventure".to_string()],
            description: "A group of intergalactic criminals".to_string(),
            director: "James Gunn".to_string(),
            actors: "Chris Pratt".to_string(),
            year: 2014,
            runtime_min: 121,
            rating: 8.1,
            votes: 757074,
            revenue_mil: 333.13,
            metascore: 76,
        };

        let summary = MovieSummary::from(&movie);
        assert_eq!(summary.title, movie.title);
        assert_eq!(summary.genre, movie.genre);
        assert_eq!(summary.year, 2014);
        assert_eq!(summary.runtime_min, 121);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("votes").is_none());
        assert!(json.get("director").is_none());
        assert_eq!(json["runtime_min"], 121);
    }
}
