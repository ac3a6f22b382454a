//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! forge + config produce:
//!     → tracing events (forged ingress, config reloads)
//!     → logging.rs subscriber (stderr, text or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - The library only emits events; the binary installs the subscriber

pub mod logging;

pub use logging::init_logging;
