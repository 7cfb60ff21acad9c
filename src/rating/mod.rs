//! Rating provider pipeline.
//!
//! Turns a media [`Item`](ratingforge_common::Item) into a uniform
//! [`Rating`](ratingforge_common::Rating) by way of one or more external
//! rating providers.
//!
//! # Module layout
//!
//! - [`provider`] -- Layer traits, the opaque payload marker, and [`RatingService`].
//! - [`filter`] -- Query-string filter merging.
//! - [`providers`] -- Concrete provider implementations (TMDB).
//! - [`platform`] -- Result selection policy.
//! - [`factory`] -- Config-driven construction of each provider's pipeline.
//! - [`registry`] -- Multi-provider lookups over the built services.

pub mod factory;
pub mod filter;
pub mod platform;
pub mod provider;
pub mod providers;
pub mod registry;

pub use factory::RatingFactory;
pub use filter::QueryFilterService;
pub use platform::AudienceRatingService;
pub use provider::{
    downcast_response, FilterService, RatingClient, RatingPlatformService, RatingResponse,
    RatingService, SearchService,
};
pub use registry::RatingRegistry;
