//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load .env → Init logging → Load config → Validate → Bind → Serve
//!
//! Shutdown:
//!     SIGTERM/SIGINT (signals.rs) or Shutdown::trigger (shutdown.rs)
//!     → Stop accepting → Drain in-flight requests → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is bound last, after config and the upstream client exist

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
