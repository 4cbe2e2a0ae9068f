//! HTTP API handlers for imdb-api

pub mod endpoints;
pub mod health;
pub mod movies;
pub mod upload;
pub mod version;

pub use endpoints::get_endpoints;
pub use health::health_routes;
pub use movies::get_movies;
pub use upload::upload_movies;
pub use version::get_version;
