//! TMDB search.

use std::sync::Arc;

use async_trait::async_trait;
use ratingforge_common::{Error, Filter, Item, ItemType, Result, SearchResult};
use reqwest::{Method, Request};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use super::models;
use crate::rating::provider::{downcast_response, FilterService, RatingClient, SearchService};

const SEARCH_MOVIE_PATH: &str = "3/search/movie";
const SEARCH_TV_PATH: &str = "3/search/tv";

/// [`SearchService`] backed by the TMDB search endpoints.
///
/// Movies go to `/3/search/movie` filtered by `year`; shows go to
/// `/3/search/tv` filtered by `first_air_date_year`. A year of `0` is not sent.
pub struct TmdbSearchService {
    client: Arc<dyn RatingClient>,
    filters: Arc<dyn FilterService>,
}

impl TmdbSearchService {
    pub fn new(client: Arc<dyn RatingClient>, filters: Arc<dyn FilterService>) -> Self {
        Self { client, filters }
    }

    fn build_request(&self, item: &Item) -> Result<Request> {
        let (path, year_param) = match item.item_type {
            ItemType::Movie => (SEARCH_MOVIE_PATH, "year"),
            ItemType::Show => (SEARCH_TV_PATH, "first_air_date_year"),
        };

        let endpoint = self
            .client
            .base_url()
            .join(path)
            .map_err(|e| Error::InvalidRequest(format!("invalid TMDB endpoint {path}: {e}")))?;

        let year = if item.year > 0 {
            item.year.to_string()
        } else {
            String::new()
        };

        let mut request = Request::new(Method::GET, endpoint);
        self.filters.apply_filters_to_request(
            &mut request,
            &[
                Filter::new("query", item.title.as_str()),
                Filter::new(year_param, year),
            ],
        );
        Ok(request)
    }
}

#[async_trait]
impl SearchService for TmdbSearchService {
    async fn get_results(
        &self,
        cancel: &CancellationToken,
        item: &Item,
    ) -> Result<Vec<SearchResult>> {
        let request = self.build_request(item)?;
        debug!(
            provider = "tmdb",
            item_id = %item.id,
            path = %request.url().path(),
            "Searching TMDB"
        );

        let payload = self
            .client
            .do_with_rating_response(cancel, request)
            .await
            .map_err(|e| {
                if !matches!(e, Error::Canceled) {
                    error!(provider = "tmdb", item_id = %item.id, "TMDB search failed: {e}");
                }
                e
            })?;

        let response: models::Response = downcast_response(payload).map_err(|e| {
            error!(provider = "tmdb", item_id = %item.id, "{e}");
            e
        })?;

        Ok(response.results.into_iter().map(SearchResult::from).collect())
    }
}
