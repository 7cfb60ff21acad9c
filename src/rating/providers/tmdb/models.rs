//! TMDB search payloads.
//!
//! These types never leave the `tmdb` module: the search service converts
//! them into provider-neutral [`SearchResult`]s.

use std::any::Any;

use ratingforge_common::SearchResult;
use serde::Deserialize;

use crate::rating::provider::RatingResponse;

/// Body of `/3/search/movie` and `/3/search/tv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Response {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<Entry>,
}

/// A single search hit. TV results use `name` / `original_name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Entry {
    pub id: i64,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default, alias = "original_name")]
    pub original_title: String,
    #[serde(default, rename = "vote_average")]
    pub vote: f64,
    #[serde(default)]
    pub adult: bool,
}

impl RatingResponse for Response {
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

impl From<Entry> for SearchResult {
    fn from(entry: Entry) -> Self {
        SearchResult {
            id: entry.id,
            title: entry.title,
            vote: entry.vote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_movie_search() {
        let body = r#"{
            "page": 1,
            "results": [
                {"id": 27205, "adult": false, "title": "Inception",
                 "original_title": "Inception", "vote_average": 8.4,
                 "release_date": "2010-07-15"}
            ],
            "total_pages": 1
        }"#;

        let resp: Response = serde_json::from_str(body).unwrap();
        assert_eq!(resp.page, 1);
        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.results[0].title, "Inception");
        assert!((resp.results[0].vote - 8.4).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_tv_search_names() {
        let body = r#"{"results": [{"id": 70523, "name": "Dark", "original_name": "Dark", "vote_average": 8.4}]}"#;

        let resp: Response = serde_json::from_str(body).unwrap();
        assert_eq!(resp.page, 0);
        assert_eq!(resp.results[0].title, "Dark");
        assert_eq!(resp.results[0].original_title, "Dark");
    }

    #[test]
    fn missing_vote_defaults_to_zero() {
        let resp: Response = serde_json::from_str(r#"{"results": [{"id": 1}]}"#).unwrap();
        assert_eq!(resp.results[0].vote, 0.0);
        assert!(!resp.results[0].adult);
    }

    #[test]
    fn error_body_is_not_a_payload() {
        let body = r#"{"status_code": 7, "status_message": "Invalid API key", "success": false}"#;
        assert!(serde_json::from_str::<Response>(body).is_err());
    }

    #[test]
    fn entry_into_search_result() {
        let entry = Entry {
            id: 42,
            title: "Heat".into(),
            original_title: "Heat".into(),
            vote: 7.9,
            adult: false,
        };
        let result = SearchResult::from(entry);
        assert_eq!(result.id, 42);
        assert_eq!(result.title, "Heat");
        assert!((result.vote - 7.9).abs() < f64::EPSILON);
    }
}
