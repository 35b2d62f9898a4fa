//! niconico series to JSON Feed bridge.
//!
//! One endpoint, `GET /series/{id}/jsonfeed`, fetches a series listing from
//! the niconico series API and republishes it as a JSON Feed 1.1 document so
//! feed readers can follow a series that has no native feed.
//!
//! ```text
//! request ─▶ series::id ─▶ series::client ─▶ series::schema ─▶ feed::transform ─▶ http::response
//!            (validate)     (GET upstream)    (strict decode)   (map items)        (cache + JSON)
//! ```

// Core pipeline
pub mod feed;
pub mod http;
pub mod series;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
