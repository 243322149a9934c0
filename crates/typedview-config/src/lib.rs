//! Typed configuration for typedview.
//!
//! This crate provides a strongly-typed configuration with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`TypedViewConfig`] contains:
//!
//! - [`DocsConfig`] - metadata and mount path of the OpenAPI document
//! - [`ViewsConfig`] - media types documented for request bodies
//! - [`LoggingConfig`] - log level and output format
//!
//! # Configuration File Format
//!
//! ```toml
//! [docs]
//! title = "drf_hello"
//! version = "1.0.0"
//! path = "/openapi"
//!
//! [views]
//! content_types = ["application/json", "multipart/form-data"]
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden with variables of the form `PREFIX__SECTION__KEY`:
//!
//! - `TYPEDVIEW__DOCS__TITLE=drf_hello`
//! - `TYPEDVIEW__LOGGING__LEVEL=debug`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::TypedViewConfig;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use schema::{DocsConfig, LogFormat, LoggingConfig, ViewsConfig};
