//! Configuration schema definitions.
//!
//! This module defines the complete runtime configuration of the service.
//! Everything except the two service URLs has a default.

/// Root configuration for the feed service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Public base URL of this service, advertised in the upstream User-Agent.
    pub app_url: String,

    /// Contact URL shown on the usage page.
    pub contact_url: String,

    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Upstream series API settings.
    pub upstream: UpstreamConfig,

    /// Timeout configuration for inbound requests.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Build a config with the required URLs and defaults for the rest.
    pub fn new(app_url: impl Into<String>, contact_url: impl Into<String>) -> Self {
        Self {
            app_url: app_url.into(),
            contact_url: contact_url.into(),
            listener: ListenerConfig::default(),
            upstream: UpstreamConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Host or IP to bind.
    pub bind_host: String,

    /// TCP port (0 picks an ephemeral port).
    pub port: u16,
}

impl ListenerConfig {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Upstream series API configuration.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Scheme and host of the series API, without a trailing path.
    pub base_url: String,

    /// Total timeout for one upstream call in seconds.
    pub timeout_secs: u64,

    /// Largest upstream body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nvapi.nicovideo.jp".to_string(),
            timeout_secs: 15,
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Prometheus scrape endpoint bind address; disabled when unset.
    pub metrics_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new("https://feed.example", "https://example/contact");
        assert_eq!(config.listener.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.upstream.base_url, "https://nvapi.nicovideo.jp");
        assert_eq!(config.upstream.timeout_secs, 15);
        assert_eq!(config.upstream.max_body_bytes, 16 * 1024 * 1024);
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(config.observability.metrics_address.is_none());
    }
}
