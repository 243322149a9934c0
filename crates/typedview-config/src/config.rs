//! Main configuration type.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::{ConfigError, DocsConfig, LogFormat, LoggingConfig, ViewsConfig};

/// Complete typedview configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use typedview_config::TypedViewConfig;
///
/// let config = TypedViewConfig::default();
/// assert_eq!(config.docs.path, "/openapi");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct TypedViewConfig {
    /// Documentation settings.
    #[serde(default)]
    pub docs: DocsConfig,

    /// View adaptation settings.
    #[serde(default)]
    pub views: ViewsConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TypedViewConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if:
    /// - The docs title or version is empty
    /// - The docs path does not start with `/`
    /// - No content type is configured, or one is not of the form `type/subtype`
    /// - The log level is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.docs.title.trim().is_empty() {
            return Err(ConfigError::invalid_value("docs.title", "must not be empty"));
        }
        if self.docs.version.trim().is_empty() {
            return Err(ConfigError::invalid_value("docs.version", "must not be empty"));
        }
        if !self.docs.path.starts_with('/') {
            return Err(ConfigError::invalid_value(
                "docs.path",
                format!("must start with '/': {}", self.docs.path),
            ));
        }

        if self.views.content_types.is_empty() {
            return Err(ConfigError::validation_error(
                "views.content_types must not be empty",
            ));
        }
        if let Some(bad) = self
            .views
            .content_types
            .iter()
            .find(|media| !is_media_type(media))
        {
            return Err(ConfigError::invalid_value(
                "views.content_types",
                format!("not a media type: {bad}"),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value("logging.level", "must not be empty"));
        }
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(ConfigError::invalid_value("logging.level", e.to_string()));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty log output at debug level.
    ///
    /// # Example
    ///
    /// ```
    /// use typedview_config::{LogFormat, TypedViewConfig};
    ///
    /// let config = TypedViewConfig::development();
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON log output at info level.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config
    }
}

fn is_media_type(media: &str) -> bool {
    matches!(
        media.split_once('/'),
        Some((kind, subtype)) if !kind.is_empty() && !subtype.is_empty() && !subtype.contains('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TypedViewConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let dev = TypedViewConfig::development();
        assert_eq!(dev.logging.level, "debug");
        assert!(dev.validate().is_ok());

        let prod = TypedViewConfig::production();
        assert_eq!(prod.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut config = TypedViewConfig::default();
        config.docs.title = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.title"));
    }

    #[test]
    fn test_relative_docs_path_rejected() {
        let mut config = TypedViewConfig::default();
        config.docs.path = "openapi".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "docs.path"
        ));
    }

    #[test]
    fn test_empty_content_types_rejected() {
        let mut config = TypedViewConfig::default();
        config.views.content_types.clear();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_malformed_content_type_rejected() {
        let mut config = TypedViewConfig::default();
        config.views.content_types = vec!["json".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_directive_rejected() {
        let mut config = TypedViewConfig::default();
        config.logging.level = "typedview_core=loud".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "logging.level"
        ));

        config.logging.level = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_directives_accepted() {
        let mut config = TypedViewConfig::default();
        for level in ["WARN", "debug", "typedview_core=debug,warn", "typedview_docs=trace"] {
            config.logging.level = level.to_string();
            assert!(config.validate().is_ok(), "{level} should be accepted");
        }
    }

    #[test]
    fn test_media_types() {
        assert!(is_media_type("application/json"));
        assert!(is_media_type("multipart/form-data"));
        assert!(!is_media_type("application/"));
        assert!(!is_media_type("a/b/c"));
    }
}
