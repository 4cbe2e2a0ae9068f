//! Movie lookup endpoint
//!
//! `GET /movies?year=YYYY` or `GET /movies?year_from=YYYY&year_to=YYYY`,
//! optionally with `genre=G`. Without any year filter the configured
//! default year is used.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use imdb_common::MovieSummary;
use tracing::{debug, warn};

use crate::error::ApiResult;
use crate::services::query::{resolve, MovieFilters};
use crate::AppState;

/// Lookup outcome
#[derive(Debug)]
pub enum MoviesResponse {
    /// At least one movie matched
    Found(Vec<MovieSummary>),
    /// Nothing matched, or the lookup itself failed
    NoContent,
}

impl IntoResponse for MoviesResponse {
    fn into_response(self) -> Response {
        match self {
            MoviesResponse::Found(movies) => Json(movies).into_response(),
            MoviesResponse::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// GET /movies
pub async fn get_movies(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<MoviesResponse> {
    let filters = MovieFilters::from_pairs(pairs);
    let query = resolve(&filters, &state.settings)?;
    debug!(?query, "Resolved movie query");

    match query.run(state.store.as_ref()).await {
        Ok(movies) if movies.is_empty() => Ok(MoviesResponse::NoContent),
        Ok(movies) => Ok(MoviesResponse::Found(movies)),
        Err(e) => {
            warn!(error = %e, ?query, "Movie lookup failed");
            Ok(MoviesResponse::NoContent)
        }
    }
}
