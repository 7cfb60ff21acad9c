//! Capability traits for rating providers.
//!
//! A provider is assembled from four layers, each behind its own trait so the
//! factory can swap implementations per provider:
//!
//! - [`RatingClient`] -- decorates requests with credentials and locale,
//!   dispatches them, and decodes provider payloads.
//! - [`FilterService`] -- merges query filters into a request.
//! - [`SearchService`] -- turns an [`Item`] into provider-neutral [`SearchResult`]s.
//! - [`RatingPlatformService`] -- picks one [`Rating`] out of the search results.
//!
//! Provider payloads cross the client/search boundary as opaque
//! [`RatingResponse`] values and are downcast exactly once, by the search
//! service that knows which payload its client produces.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use ratingforge_common::{Error, Filter, Item, Rating, Result, SearchResult};
use reqwest::{Request, Response, Url};
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Provider payloads
// ---------------------------------------------------------------------------

/// Marker for provider-specific payloads handed from a client to its search
/// service.
pub trait RatingResponse: Any + Send + Sync + fmt::Debug {
    /// Convert into `Any` so the receiving search service can downcast.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

/// Downcast an opaque payload to the concrete type `T`.
///
/// Returns [`Error::ShapeMismatch`] when the payload is of another type.
pub fn downcast_response<T: RatingResponse>(payload: Box<dyn RatingResponse>) -> Result<T> {
    payload
        .into_any()
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| Error::ShapeMismatch {
            expected: std::any::type_name::<T>(),
        })
}

// ---------------------------------------------------------------------------
// Layer traits
// ---------------------------------------------------------------------------

/// Provider-specific HTTP client.
#[async_trait]
pub trait RatingClient: Send + Sync {
    /// Attach credentials and locale to `request` and dispatch it through the
    /// transport, returning the raw response.
    async fn do_with_response(
        &self,
        cancel: &CancellationToken,
        request: Request,
    ) -> Result<Response>;

    /// Dispatch `request` and decode the body into the provider payload,
    /// classifying the response status on the way.
    async fn do_with_rating_response(
        &self,
        cancel: &CancellationToken,
        request: Request,
    ) -> Result<Box<dyn RatingResponse>>;

    /// A copy of the provider base URL for building endpoints.
    fn base_url(&self) -> Url;
}

/// Merges name/value filters into a request's query string.
pub trait FilterService: Send + Sync {
    /// Add every applicable filter to `request`, preserving existing params.
    fn apply_filters_to_request(&self, request: &mut Request, filters: &[Filter]);
}

/// Provider search normalized to [`SearchResult`]s, in provider rank order.
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn get_results(
        &self,
        cancel: &CancellationToken,
        item: &Item,
    ) -> Result<Vec<SearchResult>>;
}

/// The per-provider handle callers use to rate an item.
#[async_trait]
pub trait RatingPlatformService: Send + Sync {
    /// Rate `item`. An empty [`Rating`] means the provider has no rating.
    async fn get_rating(&self, cancel: &CancellationToken, item: &Item) -> Result<Rating>;
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// A named provider slot produced by the factory.
///
/// `platform_service` is `None` when the provider is disabled or has no
/// implementation; only its presence means the provider can be queried.
#[derive(Clone, Default)]
pub struct RatingService {
    pub name: String,
    pub platform_service: Option<Arc<dyn RatingPlatformService>>,
}

impl RatingService {
    /// A slot for a provider that is configured off or not implemented.
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform_service: None,
        }
    }

    pub fn ready(name: impl Into<String>, service: Arc<dyn RatingPlatformService>) -> Self {
        Self {
            name: name.into(),
            platform_service: Some(service),
        }
    }

    pub fn is_available(&self) -> bool {
        self.platform_service.is_some()
    }
}

impl fmt::Debug for RatingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingService")
            .field("name", &self.name)
            .field("available", &self.is_available())
            .finish()
    }
}
