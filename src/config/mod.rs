//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file + environment + flags
//!     → loader.rs (clap parse into typed values)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc through the router state
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Loaded once at startup; handlers never read the environment
//! - Validation separates syntactic (clap) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_env_file, ConfigError};
pub use schema::AppConfig;
pub use schema::{ListenerConfig, ObservabilityConfig, TimeoutConfig, UpstreamConfig};
