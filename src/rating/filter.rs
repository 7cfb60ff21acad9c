//! Query-string filter merging.

use ratingforge_common::Filter;
use reqwest::Request;

use super::provider::FilterService;

/// Stateless [`FilterService`] that appends applicable filters to a request's
/// query string.
///
/// Existing parameters are kept, duplicates are allowed, and values are
/// form-urlencoded so spaces, `&` and `=` round-trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryFilterService;

impl QueryFilterService {
    pub fn new() -> Self {
        Self
    }
}

impl FilterService for QueryFilterService {
    fn apply_filters_to_request(&self, request: &mut Request, filters: &[Filter]) {
        let url = request.url_mut();

        let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        pairs.extend(
            filters
                .iter()
                .filter(|f| f.is_applicable())
                .map(|f| (f.name.clone(), f.value.clone())),
        );

        if pairs.is_empty() {
            url.set_query(None);
            return;
        }

        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}
