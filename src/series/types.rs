//! Error definitions for the series pipeline.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while building a series feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The path segment is not a valid series id.
    #[error("bad request: {0}")]
    BadRequest(&'static str),

    /// The upstream API could not be reached or answered with a failure.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The upstream body does not have the expected shape.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result type for the series pipeline.
pub type FeedResult<T> = Result<T, FeedError>;

/// Transport-level failures talking to the upstream series API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request did not complete within the configured timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// The upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// The body exceeded the configured size limit.
    #[error("upstream body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// Connection, TLS or body read failure.
    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err)
        }
    }
}

/// The upstream body failed strict decoding.
#[derive(Debug, Error)]
#[error("upstream body does not match the series schema at `{path}`: {message}")]
pub struct SchemaError {
    /// Location of the rejected value, e.g. `data.items[3]`.
    pub path: String,
    /// Decoder message naming the offending field.
    pub message: String,
}

impl SchemaError {
    pub fn new(path: impl Into<String>, err: serde_json::Error) -> Self {
        Self {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// A structural mismatch found before serde runs.
    pub fn mismatch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
