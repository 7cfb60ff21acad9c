//! First-hit audience rating selection.

use std::sync::Arc;

use async_trait::async_trait;
use ratingforge_common::{Item, Rating, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::provider::{RatingPlatformService, SearchService};

/// [`RatingPlatformService`] that trusts the provider's ranking.
///
/// The first search result is authoritative. Its vote becomes an audience
/// rating when positive; a zero or negative vote, or no results at all, yield
/// the empty rating without an error.
pub struct AudienceRatingService {
    label: String,
    search: Arc<dyn SearchService>,
}

impl AudienceRatingService {
    pub fn new(label: impl Into<String>, search: Arc<dyn SearchService>) -> Self {
        Self {
            label: label.into(),
            search,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[async_trait]
impl RatingPlatformService for AudienceRatingService {
    async fn get_rating(&self, cancel: &CancellationToken, item: &Item) -> Result<Rating> {
        let results = self.search.get_results(cancel, item).await?;

        let Some(first) = results.first() else {
            debug!(provider = %self.label, item_id = %item.id, "No search results");
            return Ok(Rating::default());
        };

        if results.len() > 1 {
            debug!(
                provider = %self.label,
                item_id = %item.id,
                count = results.len(),
                chosen = %first.title,
                "Multiple results; using the first"
            );
        }

        if first.vote > 0.0 {
            Ok(Rating::audience(self.label.clone(), first.vote as f32))
        } else {
            debug!(
                provider = %self.label,
                item_id = %item.id,
                vote = first.vote,
                "Top result has no rating"
            );
            Ok(Rating::default())
        }
    }
}
