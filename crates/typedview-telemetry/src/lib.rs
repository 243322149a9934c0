//! Structured logging for typedview.
//!
//! Registration and dispatch emit `tracing` events (`operation_id`, `methods`, request path).
//! This crate installs a `tracing-subscriber` pipeline that renders them as JSON or in a
//! human-readable format.
//!
//! # Example
//!
//! ```rust,ignore
//! use typedview_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::from(&config.logging))?;
//! ```

#![warn(missing_docs)]

mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{create_env_filter, init_logging, LogConfig};
