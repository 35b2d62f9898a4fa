//! Shared utilities for integration tests.
//!
//! `TestApp` runs the real server on an ephemeral port with the series API
//! replaced by a `wiremock` server.

#![allow(dead_code)]

use serde_json::{json, Value};
use tokio::net::TcpListener;
use wiremock::MockServer;

use nicoseriesfeed::{AppConfig, HttpServer, Shutdown};

pub const APP_URL: &str = "https://feed.example.test";
pub const CONTACT_URL: &str = "https://example.test/contact";

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub upstream: MockServer,
    shutdown: Shutdown,
}

impl TestApp {
    /// Spawn with default settings.
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn after letting the caller adjust the config.
    pub async fn spawn_with(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let upstream = MockServer::start().await;

        let mut config = AppConfig::new(APP_URL, CONTACT_URL);
        config.listener.bind_host = "127.0.0.1".to_string();
        config.listener.port = 0;
        config.upstream.base_url = upstream.uri();
        configure(&mut config);

        let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config).unwrap();
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();

        Self {
            address,
            client,
            upstream,
            shutdown,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("server unreachable")
    }

    /// Ask the server to stop.
    pub fn stop(&self) {
        self.shutdown.trigger();
    }

    /// Number of requests the fake series API has seen.
    pub async fn upstream_calls(&self) -> usize {
        self.upstream
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// A listing item as the series API returns it.
pub fn series_item(meta_id: &str, video_id: &str) -> Value {
    json!({
        "meta": { "id": meta_id },
        "video": {
            "id": video_id,
            "title": format!("Title of {video_id}"),
            "registeredAt": "2021-01-01T00:00:00Z",
            "thumbnail": { "nHdUrl": format!("http://i/{video_id}.jpg") },
            "shortDescription": format!("About {video_id}")
        }
    })
}

/// A full series API body wrapping `items`.
pub fn series_body(items: Vec<Value>) -> Value {
    json!({
        "meta": { "status": 200 },
        "data": {
            "detail": { "title": "T", "thumbnailUrl": "http://i/x.jpg" },
            "items": items
        }
    })
}
