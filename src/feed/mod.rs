//! JSON Feed output.
//!
//! `transform.rs` turns a validated [`crate::series::SeriesPage`] into the
//! [`JsonFeed`] document defined in `types.rs`.

pub mod transform;
pub mod types;

pub use transform::build_feed;
pub use types::{FeedItem, JsonFeed, JSON_FEED_VERSION};
