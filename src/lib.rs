//! Ratingforge - Rating provider pipeline for media overlays
//!
//! This library crate exposes the rating pipeline for the binary and for
//! integration testing.

pub mod config;
pub mod http;
pub mod logging;
pub mod rating;

pub use ratingforge_common::{
    Error, ErrorKind, Filter, Item, ItemType, Rating, RatingType, Result, SearchResult,
};
