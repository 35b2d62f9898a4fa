//! Response writing and error mapping.
//!
//! # Responsibilities
//! - Attach the fixed caching policy to feed responses
//! - Serialize the feed document as JSON
//! - Map pipeline errors to HTTP status codes
//!
//! # Design Decisions
//! - Error bodies are short plain text, never a partial feed
//! - Upstream timeouts result in 504 Gateway Timeout, other upstream and
//!   schema failures in 502 Bad Gateway

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::feed::JsonFeed;
use crate::series::{FeedError, UpstreamError};

/// Feeds may be cached by anyone for one hour.
pub const FEED_CACHE_CONTROL: &str = "max-age=3600, public";

/// A successful feed response.
#[derive(Debug)]
pub struct FeedResponse(pub JsonFeed);

impl IntoResponse for FeedResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(
                header::CACHE_CONTROL,
                HeaderValue::from_static(FEED_CACHE_CONTROL),
            )],
            Json(self.0),
        )
            .into_response()
    }
}

impl FeedError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FeedError::BadRequest(_) => StatusCode::BAD_REQUEST,
            FeedError::Upstream(UpstreamError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            FeedError::Upstream(_) | FeedError::Schema(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Metric label for this error kind.
    pub fn outcome(&self) -> &'static str {
        match self {
            FeedError::BadRequest(_) => "bad_request",
            FeedError::Upstream(_) => "upstream_error",
            FeedError::Schema(_) => "schema_error",
        }
    }
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        let message = match &self {
            FeedError::BadRequest(reason) => format!("Invalid series id: {reason}"),
            FeedError::Upstream(UpstreamError::Timeout) => {
                "Series API did not respond in time".to_string()
            }
            FeedError::Upstream(_) => "Series API request failed".to_string(),
            FeedError::Schema(_) => "Series API returned an unexpected response".to_string(),
        };
        (self.status_code(), message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::JSON_FEED_VERSION;
    use crate::series::SchemaError;

    #[test]
    fn test_feed_response_headers() {
        let feed = JsonFeed {
            version: JSON_FEED_VERSION,
            title: "t".into(),
            home_page_url: "https://www.nicovideo.jp/series/1".into(),
            icon: "i".into(),
            items: Vec::new(),
        };
        let response = FeedResponse(feed).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "max-age=3600, public"
        );
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[test]
    fn test_cache_policy_is_one_hour() {
        assert_eq!(FEED_CACHE_CONTROL, format!("max-age={}, public", 60 * 60));
    }

    #[test]
    fn test_error_status_mapping() {
        let bad = FeedError::BadRequest("nope");
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);

        let timeout = FeedError::Upstream(UpstreamError::Timeout);
        assert_eq!(timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);

        let status = FeedError::Upstream(UpstreamError::Status(StatusCode::NOT_FOUND));
        assert_eq!(status.status_code(), StatusCode::BAD_GATEWAY);

        let decode_err = serde_json::from_str::<String>("1").unwrap_err();
        let schema = FeedError::Schema(SchemaError::new("body", decode_err));
        assert_eq!(schema.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(schema.outcome(), "schema_error");
    }

    #[test]
    fn test_error_response_has_no_cache_header() {
        let response = FeedError::BadRequest("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }
}
