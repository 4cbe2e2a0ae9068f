//! Database layer
//!
//! SQLite schema setup and the `MovieStore` implementation.

pub mod init;
pub mod movies;

pub use init::init_database;
pub use movies::SqliteMovieStore;
