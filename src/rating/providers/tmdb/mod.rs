//! TMDB (The Movie Database) rating provider.
//!
//! Queries the TMDB v3 search API and reports the top hit's `vote_average` as
//! an audience rating. The TMDB payload types stay inside this module.

mod client;
mod models;
mod search;

pub use client::{TmdbClient, TMDB_BASE_URL};
pub use search::TmdbSearchService;

/// Provider label carried by TMDB ratings.
pub const TMDB_LABEL: &str = "TMDB";
