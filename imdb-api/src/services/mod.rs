//! Request-independent service logic
//!
//! - `ingest`: CSV upload parsing and insertion
//! - `query`: `/movies` filter validation and store query selection

pub mod ingest;
pub mod query;
