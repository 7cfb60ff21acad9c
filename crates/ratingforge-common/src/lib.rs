//! Ratingforge-Common: Shared rating types and errors.
//!
//! This crate provides the provider-neutral vocabulary used across ratingforge:
//!
//! - **Items**: the media object a caller wants rated ([`Item`], [`ItemType`])
//! - **Search**: query filters and normalized search hits ([`Filter`], [`SearchResult`])
//! - **Ratings**: the uniform output shape ([`Rating`], [`RatingType`])
//! - **Error Handling**: the error taxonomy and result alias
//!
//! # Examples
//!
//! ```
//! use ratingforge_common::{Error, ErrorKind, Item, ItemType, Rating, Result};
//!
//! let item = Item::new("tt1375666", "Inception", 2010, ItemType::Movie);
//! assert_eq!(item.year, 2010);
//!
//! // An empty rating means "no rating available", not a failure.
//! assert!(Rating::default().is_empty());
//!
//! fn example() -> Result<Rating> {
//!     Err(Error::NotAuthorized("token expired".into()))
//! }
//! assert_eq!(example().unwrap_err().kind(), ErrorKind::NotAuthorized);
//! ```

pub mod error;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use types::*;
