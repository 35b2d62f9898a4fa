//! Configuration loading from the process environment.
//!
//! Every setting can be passed as a flag or an environment variable; `main`
//! calls [`load_env_file`] before [`load_config`].

use std::ffi::OsString;
use std::path::Path;

use clap::Parser;
use thiserror::Error;

use crate::config::schema::{
    AppConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig, UpstreamConfig,
};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `.env` file exists but could not be read or parsed.
    #[error("Failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// Missing or unparsable arguments/variables (also `--help`/`--version`).
    #[error(transparent)]
    Args(#[from] clap::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Parser)]
#[command(name = "nicoseriesfeed", version)]
#[command(about = "Republishes niconico video series as JSON Feed", long_about = None)]
struct EnvArgs {
    /// Public base URL of this service
    #[arg(long, env = "APP_URL")]
    app_url: String,

    /// Contact URL shown on the usage page
    #[arg(long, env = "CONTACT_URL")]
    contact_url: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    bind_host: String,

    #[arg(long, env = "UPSTREAM_BASE_URL", default_value = "https://nvapi.nicovideo.jp")]
    upstream_base_url: String,

    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 15)]
    upstream_timeout_secs: u64,

    /// Largest upstream body accepted, in bytes
    #[arg(long, env = "UPSTREAM_MAX_BODY_BYTES", default_value_t = 16 * 1024 * 1024)]
    upstream_max_body_bytes: usize,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Bind address for the Prometheus scrape endpoint
    #[arg(long, env = "METRICS_ADDRESS")]
    metrics_address: Option<String>,
}

impl From<EnvArgs> for AppConfig {
    fn from(args: EnvArgs) -> Self {
        Self {
            app_url: args.app_url,
            contact_url: args.contact_url,
            listener: ListenerConfig {
                bind_host: args.bind_host,
                port: args.port,
            },
            upstream: UpstreamConfig {
                base_url: args.upstream_base_url,
                timeout_secs: args.upstream_timeout_secs,
                max_body_bytes: args.upstream_max_body_bytes,
            },
            timeouts: TimeoutConfig {
                request_secs: args.request_timeout_secs,
            },
            observability: ObservabilityConfig {
                metrics_address: args.metrics_address,
            },
        }
    }
}

/// Load variables from an env file into the process environment.
///
/// Variables already set win. A missing file is not an error and returns
/// `Ok(false)`; a file that exists but does not parse is.
pub fn load_env_file(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(ConfigError::EnvFile(e)),
    }
}

/// Load and validate configuration from the command line and environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(std::env::args_os())
}

/// Same as [`load_config`] with explicit arguments.
pub fn load_config_from<I, T>(args: I) -> Result<AppConfig, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = EnvArgs::try_parse_from(args)?;
    let config = AppConfig::from(args);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
