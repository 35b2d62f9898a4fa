//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs (series id → upstream → schema → feed)
//!     → response.rs (cache headers, JSON body, error statuses)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{FeedResponse, FEED_CACHE_CONTROL};
pub use server::{AppState, HttpServer};
