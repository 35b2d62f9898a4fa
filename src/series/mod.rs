//! Upstream series subsystem.
//!
//! # Data Flow
//! ```text
//! /series/{id}/jsonfeed
//!     → id.rs (validate the path segment as a series id)
//!     → client.rs (GET /v2/series/{id}?page=1&pageSize=500)
//!     → schema.rs (strict typed decode of the body)
//!     → SeriesPage (handed to the feed transformer)
//! ```
//!
//! # Design Decisions
//! - Any failure aborts the request; nothing here retries or falls back
//! - Only the first page is fetched, larger series are truncated
//! - Validation, transport and schema failures stay distinct error kinds

pub mod client;
pub mod id;
pub mod schema;
pub mod types;

pub use client::SeriesClient;
pub use id::SeriesId;
pub use schema::{decode_series, SeriesPage};
pub use types::{FeedError, FeedResult, SchemaError, UpstreamError};
