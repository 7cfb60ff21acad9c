//! Registry of built [`RatingService`] slots.
//!
//! The [`RatingRegistry`] keeps every slot the factory produced, including the
//! unavailable ones, and can collect ratings for an item from all available
//! providers.

use ratingforge_common::{Error, Item, Rating, Result};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::factory::RatingFactory;
use super::provider::RatingService;

/// A registry over the providers built from one configuration.
///
/// Services are stored in registration order.
///
/// # Examples
///
/// ```rust,ignore
/// use ratingforge::rating::{RatingFactory, RatingRegistry};
///
/// let registry = RatingRegistry::from_factory(&RatingFactory::new(config))?;
/// let ratings = registry.ratings_for(&cancel, &item).await?;
/// ```
#[derive(Debug, Default)]
pub struct RatingRegistry {
    services: Vec<RatingService>,
}

impl RatingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            services: Vec::new(),
        }
    }

    /// Build every provider slot through `factory`.
    pub fn from_factory(factory: &RatingFactory) -> Result<Self> {
        Ok(Self {
            services: factory.build_all()?,
        })
    }

    pub fn register(&mut self, service: RatingService) {
        self.services.push(service);
    }

    /// All registered slots, available or not.
    pub fn services(&self) -> &[RatingService] {
        &self.services
    }

    /// Slots that carry a platform service.
    pub fn available(&self) -> Vec<&RatingService> {
        self.services.iter().filter(|s| s.is_available()).collect()
    }

    /// Look up a slot by provider label (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&RatingService> {
        self.services
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Rate `item` with every available provider, one after the other.
    ///
    /// Empty ratings are dropped. A failing provider is logged and skipped so
    /// it does not hide the others; cancellation aborts the whole lookup.
    pub async fn ratings_for(&self, cancel: &CancellationToken, item: &Item) -> Result<Vec<Rating>> {
        let mut ratings = Vec::new();

        for service in &self.services {
            let Some(platform) = &service.platform_service else {
                continue;
            };

            match platform.get_rating(cancel, item).await {
                Ok(rating) if rating.is_empty() => {}
                Ok(rating) => ratings.push(rating),
                Err(Error::Canceled) => return Err(Error::Canceled),
                Err(e) => {
                    warn!(
                        provider = %service.name,
                        item_id = %item.id,
                        kind = %e.kind(),
                        "Skipping provider: {e}"
                    );
                }
            }
        }

        Ok(ratings)
    }
}
