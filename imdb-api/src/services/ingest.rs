//! CSV movie ingestion
//!
//! Reads an uploaded CSV file line by line and inserts every valid movie.
//! Expected columns (12, whitespace trimmed):
//!
//! `rank, title, genre, description, director, actors, year, runtime_min,
//! rating, votes, revenue_mil, metascore`
//!
//! The first line is always a header. If that first line cannot be parsed
//! as a 12-field record the whole file is rejected; later malformed lines
//! are skipped. Lines without rank, title or year are skipped and not
//! counted. Every other line counts as read and ends up either created or
//! errored (bad field value, duplicate title/year, store failure).
//! Inserted movies are never rolled back.
//!
//! Fields are not required to be UTF-8; invalid sequences are replaced with
//! U+FFFD before conversion.

use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use imdb_common::models::{split_genres, CSV_FIELD_COUNT};
use imdb_common::{MovieRecord, MovieStore};
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

const COL_RANK: usize = 0;
const COL_TITLE: usize = 1;
const COL_GENRE: usize = 2;
const COL_DESCRIPTION: usize = 3;
const COL_DIRECTOR: usize = 4;
const COL_ACTORS: usize = 5;
const COL_YEAR: usize = 6;
const COL_RUNTIME: usize = 7;
const COL_RATING: usize = 8;
const COL_VOTES: usize = 9;
const COL_REVENUE: usize = 10;
const COL_METASCORE: usize = 11;

/// Counters returned for one upload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadSummary {
    pub records_read: u64,
    pub records_created: u64,
    pub records_errored: u64,
}

/// Failure that rejects a whole upload
#[derive(Debug, Error)]
pub enum IngestError {
    /// The first line is not a well-formed 12-field record
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
}

/// A field of an otherwise well-shaped line that could not be converted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} conversion failed for {value:?}")]
pub struct FieldError {
    pub field: &'static str,
    pub value: String,
}

/// Where the reader is within the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Nothing read yet; the next well-formed line is the header
    AwaitingHeader,
    /// Header consumed; lines are movie records
    Streaming,
}

fn field_error(record: &StringRecord, index: usize, field: &'static str) -> FieldError {
    FieldError {
        field,
        value: record[index].to_string(),
    }
}

fn parse_field<T: FromStr>(
    record: &StringRecord,
    index: usize,
    field: &'static str,
) -> Result<T, FieldError> {
    record[index]
        .parse()
        .map_err(|_| field_error(record, index, field))
}

fn parse_optional_field<T: FromStr + Default>(
    record: &StringRecord,
    index: usize,
    field: &'static str,
) -> Result<T, FieldError> {
    if record[index].is_empty() {
        Ok(T::default())
    } else {
        parse_field(record, index, field)
    }
}

// "NaN" and "inf" parse as f64 but cannot be stored or ranked
fn finite(
    value: f64,
    record: &StringRecord,
    index: usize,
    field: &'static str,
) -> Result<f64, FieldError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(field_error(record, index, field))
    }
}

/// Convert one 12-field record into a movie
///
/// Rank must be a positive integer; rating and revenue must be finite.
pub fn parse_movie(record: &StringRecord) -> Result<MovieRecord, FieldError> {
    let rank: i32 = parse_field(record, COL_RANK, "rank")?;
    if rank <= 0 {
        return Err(field_error(record, COL_RANK, "rank"));
    }

    let rating = parse_field(record, COL_RATING, "rating")?;
    let revenue_mil = parse_optional_field(record, COL_REVENUE, "revenue_mil")?;

    Ok(MovieRecord {
        rank,
        title: record[COL_TITLE].to_string(),
        genre: split_genres(&record[COL_GENRE]),
        description: record[COL_DESCRIPTION].to_string(),
        director: record[COL_DIRECTOR].to_string(),
        actors: record[COL_ACTORS].to_string(),
        year: parse_field(record, COL_YEAR, "year")?,
        runtime_min: parse_field(record, COL_RUNTIME, "runtime_min")?,
        rating: finite(rating, record, COL_RATING, "rating")?,
        votes: parse_field(record, COL_VOTES, "votes")?,
        revenue_mil: finite(revenue_mil, record, COL_REVENUE, "revenue_mil")?,
        metascore: parse_optional_field(record, COL_METASCORE, "metascore")?,
    })
}

fn check_shape(record: &ByteRecord) -> Result<(), String> {
    if record.len() == CSV_FIELD_COUNT {
        Ok(())
    } else {
        Err(format!(
            "expected {} fields, found {}",
            CSV_FIELD_COUNT,
            record.len()
        ))
    }
}

/// Decode raw fields, replacing invalid UTF-8
fn decode_lossy(record: &ByteRecord) -> StringRecord {
    record.iter().map(String::from_utf8_lossy).collect()
}

/// Ingest a CSV upload into `store`
pub async fn ingest_csv(store: &dyn MovieStore, data: &[u8]) -> Result<UploadSummary, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let mut state = ParseState::AwaitingHeader;
    let mut summary = UploadSummary::default();
    let mut record = ByteRecord::new();
    let mut line: u64 = 0;

    loop {
        let shape = match reader.read_byte_record(&mut record) {
            Ok(false) => break,
            Ok(true) => check_shape(&record),
            Err(e) => Err(e.to_string()),
        };
        line += 1;

        match (state, shape) {
            (ParseState::AwaitingHeader, Err(reason)) => {
                info!(line, %reason, "Invalid file content on first line");
                return Err(IngestError::InvalidFormat(reason));
            }
            (ParseState::AwaitingHeader, Ok(())) => {
                debug!(line, "Ignoring header line");
                state = ParseState::Streaming;
            }
            (ParseState::Streaming, Err(reason)) => {
                info!(line, %reason, "Skipping malformed line");
            }
            (ParseState::Streaming, Ok(())) => {
                ingest_record(store, &decode_lossy(&record), line, &mut summary).await;
            }
        }
    }

    info!(
        read = summary.records_read,
        created = summary.records_created,
        errored = summary.records_errored,
        "CSV ingestion finished"
    );
    Ok(summary)
}

async fn ingest_record(
    store: &dyn MovieStore,
    record: &StringRecord,
    line: u64,
    summary: &mut UploadSummary,
) {
    // Blank or footer row
    if record[COL_RANK].is_empty() {
        return;
    }

    if record[COL_TITLE].is_empty() || record[COL_YEAR].is_empty() {
        info!(line, "Title and/or year missing, skipping line");
        return;
    }

    summary.records_read += 1;

    let movie = match parse_movie(record) {
        Ok(movie) => movie,
        Err(e) => {
            info!(line, error = %e, "Movie record validation failed");
            summary.records_errored += 1;
            return;
        }
    };

    match store.insert(&movie).await {
        Ok(_) => summary.records_created += 1,
        Err(e) if e.is_duplicate() => {
            info!(line, error = %e, "Movie already stored");
            summary.records_errored += 1;
        }
        Err(e) => {
            warn!(line, error = %e, "Movie insert failed");
            summary.records_errored += 1;
        }
    }
}
