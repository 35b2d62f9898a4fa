//! Upstream series API client.
//!
//! # Responsibilities
//! - Build the series listing URL for a validated id
//! - Identify this service to the upstream operator
//! - Enforce a total timeout on every call
//! - Surface transport failures and non-2xx statuses as [`UpstreamError`]

use std::time::{Duration, Instant};

use axum::body::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::series::id::SeriesId;
use crate::series::types::UpstreamError;

/// Items requested per call. Only the first page is ever fetched.
pub const SERIES_PAGE_SIZE: u32 = 500;

/// Client for `GET /v2/series/{id}`.
#[derive(Clone)]
pub struct SeriesClient {
    http: reqwest::Client,
    base_url: String,
    max_body_bytes: usize,
    user_agent: String,
}

impl SeriesClient {
    /// Create a client for the configured upstream.
    ///
    /// `app_url` is advertised in the User-Agent.
    pub fn new(config: &UpstreamConfig, app_url: &str) -> Result<Self, reqwest::Error> {
        let user_agent = user_agent(app_url);

        let mut headers = HeaderMap::new();
        headers.insert("X-Frontend-Id", HeaderValue::from_static("6"));
        headers.insert("X-Frontend-Version", HeaderValue::from_static("0"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_body_bytes: config.max_body_bytes,
            user_agent,
        })
    }

    /// Listing URL for `id`, without the query string.
    pub fn series_url(&self, id: &SeriesId) -> String {
        format!("{}/v2/series/{}", self.base_url, id)
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Fetch the raw body of the first listing page.
    ///
    /// The body is returned undecoded; schema checks happen in
    /// [`crate::series::schema`].
    pub async fn fetch_series(&self, id: &SeriesId) -> Result<Bytes, UpstreamError> {
        let start_time = Instant::now();
        let result = self.send(id).await;
        metrics::record_upstream_request(upstream_outcome(&result), start_time);
        result
    }

    async fn send(&self, id: &SeriesId) -> Result<Bytes, UpstreamError> {
        tracing::debug!(series_id = %id, "Fetching series listing");

        let mut response = self
            .http
            .get(self.series_url(id))
            .query(&[("page", 1), ("pageSize", SERIES_PAGE_SIZE)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        self.read_body(&mut response).await
    }

    /// Read the body, stopping as soon as it exceeds `max_body_bytes`.
    async fn read_body(&self, response: &mut reqwest::Response) -> Result<Bytes, UpstreamError> {
        let limit = self.max_body_bytes;
        let too_large = UpstreamError::BodyTooLarge { limit };

        let declared = response.content_length().unwrap_or(0);
        if declared > limit as u64 {
            return Err(too_large);
        }

        let mut body = Vec::with_capacity(declared as usize);
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(too_large);
            }
            body.extend_from_slice(&chunk);
        }
        Ok(Bytes::from(body))
    }
}

impl std::fmt::Debug for SeriesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesClient")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn user_agent(app_url: &str) -> String {
    format!(
        "{}/{} (+{})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        app_url
    )
}

fn upstream_outcome(result: &Result<Bytes, UpstreamError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(UpstreamError::Timeout) => "timeout",
        Err(UpstreamError::Status(_)) => "status",
        Err(UpstreamError::BodyTooLarge { .. }) => "too_large",
        Err(UpstreamError::Transport(_)) => "transport",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> SeriesClient {
        let config = UpstreamConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            max_body_bytes: 1024,
        };
        SeriesClient::new(&config, "https://feed.example.com").unwrap()
    }

    #[test]
    fn test_series_url() {
        let id = SeriesId::parse("00123").unwrap();
        assert_eq!(
            client("https://nvapi.nicovideo.jp").series_url(&id),
            "https://nvapi.nicovideo.jp/v2/series/00123"
        );
        assert_eq!(
            client("http://127.0.0.1:8080/").series_url(&id),
            "http://127.0.0.1:8080/v2/series/00123"
        );
    }

    #[test]
    fn test_user_agent_names_service_and_contact() {
        let ua = client("https://nvapi.nicovideo.jp").user_agent().to_string();
        assert_eq!(
            ua,
            format!("nicoseriesfeed/{} (+https://feed.example.com)", env!("CARGO_PKG_VERSION"))
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let closed_port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = client(&format!("http://127.0.0.1:{closed_port}"));
        let err = client
            .fetch_series(&SeriesId::parse("1").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
    }

    #[tokio::test]
    async fn test_body_over_limit_rejected() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/series/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(4096)))
            .mount(&upstream)
            .await;

        let err = client(&upstream.uri())
            .fetch_series(&SeriesId::parse("1").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::BodyTooLarge { limit: 1024 }));
    }

    #[tokio::test]
    async fn test_body_within_limit_returned() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/series/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(1024)))
            .mount(&upstream)
            .await;

        let body = client(&upstream.uri())
            .fetch_series(&SeriesId::parse("1").unwrap())
            .await
            .unwrap();
        assert_eq!(body.len(), 1024);
    }
}
