//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap handles presence and numeric parsing)
//! - Check URLs are absolute http(s) URLs
//! - Validate value ranges (timeouts and limits > 0, addresses parse)
//! - Keep the inbound timeout longer than the upstream one
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before the server binds

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is not an absolute http(s) URL: {value:?} ({reason})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error(
        "REQUEST_TIMEOUT_SECS ({request_secs}) must be greater than UPSTREAM_TIMEOUT_SECS ({upstream_secs})"
    )]
    RequestTimeoutTooShort { request_secs: u64, upstream_secs: u64 },

    #[error("{field} is not a socket address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },
}

/// Check every semantic constraint, collecting all failures.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_http_url("APP_URL", &config.app_url, &mut errors);
    check_http_url("UPSTREAM_BASE_URL", &config.upstream.base_url, &mut errors);

    if config.contact_url.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "CONTACT_URL",
        });
    }
    if config.listener.bind_host.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "BIND_HOST" });
    }
    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "UPSTREAM_TIMEOUT_SECS",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "REQUEST_TIMEOUT_SECS",
        });
    }
    // The inbound timeout answers 408, so it must not fire before the upstream one.
    let (request_secs, upstream_secs) = (config.timeouts.request_secs, config.upstream.timeout_secs);
    if request_secs > 0 && upstream_secs > 0 && request_secs <= upstream_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs,
            upstream_secs,
        });
    }
    if config.upstream.max_body_bytes == 0 {
        errors.push(ValidationError::Zero {
            field: "UPSTREAM_MAX_BODY_BYTES",
        });
    }
    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field: "METRICS_ADDRESS",
                value: addr.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Empty { field });
        return;
    }
    let invalid = |reason: String| ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
        reason,
    };
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        Ok(url) => errors.push(invalid(format!("unsupported scheme `{}`", url.scheme()))),
        Err(e) => errors.push(invalid(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AppConfig {
        AppConfig::new("https://feed.example.com", "https://example.com/contact")
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid();
        config.app_url = "feed.example.com".to_string();
        config.contact_url = "  ".to_string();
        config.upstream.timeout_secs = 0;
        config.timeouts.request_secs = 0;
        config.observability.metrics_address = Some("nowhere".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(matches!(errors[0], ValidationError::InvalidUrl { field: "APP_URL", .. }));
        assert!(errors.contains(&ValidationError::Empty {
            field: "CONTACT_URL"
        }));
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        let mut config = valid();
        config.upstream.base_url = "ftp://nvapi.example".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("UPSTREAM_BASE_URL"));
    }

    #[test]
    fn test_request_timeout_must_exceed_upstream_timeout() {
        let mut config = valid();
        config.upstream.timeout_secs = 60;
        config.timeouts.request_secs = 30;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::RequestTimeoutTooShort {
                request_secs: 30,
                upstream_secs: 60
            }]
        );

        config.timeouts.request_secs = 60;
        assert!(validate_config(&config).is_err());

        config.timeouts.request_secs = 61;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_body_limit_rejected() {
        let mut config = valid();
        config.upstream.max_body_bytes = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::Zero {
                field: "UPSTREAM_MAX_BODY_BYTES"
            }]
        );
    }

    #[test]
    fn test_accepts_metrics_socket_address() {
        let mut config = valid();
        config.observability.metrics_address = Some("127.0.0.1:9090".to_string());
        assert!(validate_config(&config).is_ok());
    }
}
