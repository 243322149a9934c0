//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use serde::{Deserialize, Serialize};
use typedview_core::{Adapter, DEFAULT_CONTENT_TYPES};

/// Documentation section.
///
/// Controls the metadata of the generated OpenAPI document and where it is served.
///
/// # Example
///
/// ```
/// use typedview_config::DocsConfig;
///
/// let config = DocsConfig::default();
/// assert_eq!(config.path, "/openapi");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    /// Document title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Document version.
    #[serde(default = "default_version")]
    pub version: String,

    /// Document description.
    #[serde(default)]
    pub description: Option<String>,

    /// Path the schema view is mounted at.
    #[serde(default = "default_docs_path")]
    pub path: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
            description: None,
            path: default_docs_path(),
        }
    }
}

fn default_title() -> String {
    "API".to_string()
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_docs_path() -> String {
    "/openapi".to_string()
}

/// View adaptation section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ViewsConfig {
    /// Media types documented for every request body.
    #[serde(default = "default_content_types")]
    pub content_types: Vec<String>,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            content_types: default_content_types(),
        }
    }
}

impl ViewsConfig {
    /// Builds an adapter documenting the configured media types.
    #[must_use]
    pub fn adapter(&self) -> Adapter {
        Adapter::new().with_content_types(&self.content_types)
    }
}

fn default_content_types() -> Vec<String> {
    DEFAULT_CONTENT_TYPES.iter().map(ToString::to_string).collect()
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log filter directive, e.g. `info` or `typedview_core=debug,warn`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_true() -> bool {
    true
}
