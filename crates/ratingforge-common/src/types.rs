//! Core type definitions for items, search hits, and ratings.
//!
//! Everything here is provider-neutral: provider payloads are normalized into
//! these shapes before they leave the provider subtree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// A single movie.
    #[default]
    Movie,
    /// A TV series.
    Show,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Show => write!(f, "show"),
        }
    }
}

impl std::str::FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "show" | "tv" | "series" => Ok(Self::Show),
            other => Err(format!("unknown item type: {other}")),
        }
    }
}

/// A media item the caller wants rated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Caller-side identifier, only used for log correlation.
    pub id: String,
    pub title: String,
    /// Release year; `0` means unknown.
    pub year: i32,
    #[serde(rename = "type", default)]
    pub item_type: ItemType,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year: i32,
        item_type: ItemType,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year,
            item_type,
        }
    }
}

/// A single query-string filter.
///
/// A filter with an empty name or an empty value never reaches the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    pub value: String,
}

impl Filter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether this filter carries both a name and a value.
    pub fn is_applicable(&self) -> bool {
        !self.name.is_empty() && !self.value.is_empty()
    }
}

/// A provider-neutral search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Provider-specific numeric identifier.
    pub id: i64,
    pub title: String,
    /// Audience score on a 0-10 scale. Zero or negative means "no rating".
    pub vote: f64,
}

/// Origin of a rating score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingType {
    /// Score from professional critics.
    Critic,
    /// Score derived from end-user votes.
    Audience,
}

impl fmt::Display for RatingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critic => write!(f, "critic"),
            Self::Audience => write!(f, "audience"),
        }
    }
}

/// Uniform rating returned by every provider.
///
/// The default value is the empty rating: "no rating available", which is
/// distinct from a failed lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Provider label, e.g. `"TMDB"`.
    pub name: String,
    pub rating: f32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rating_type: Option<RatingType>,
}

impl Rating {
    /// Build an audience rating for the given provider label.
    pub fn audience(name: impl Into<String>, rating: f32) -> Self {
        Self {
            name: name.into(),
            rating,
            rating_type: Some(RatingType::Audience),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.rating == 0.0 && self.rating_type.is_none()
    }
}
