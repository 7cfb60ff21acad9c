//! Concrete rating provider implementations.
//!
//! Each submodule wraps a single external API and implements the client and
//! search layers of [`crate::rating::provider`]. Rotten Tomatoes and IMDB
//! have labels but no implementation yet.

pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbSearchService, TMDB_LABEL};

/// Provider label for Rotten Tomatoes.
pub const ROTTEN_TOMATOES_LABEL: &str = "Rotten Tomatoes";

/// Provider label for IMDB.
pub const IMDB_LABEL: &str = "IMDB";
