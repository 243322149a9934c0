//! Registration-time error types.
//!
//! Every error in this module is raised while a handler is being reflected, translated or
//! registered. Errors raised by a handler while serving a request are not represented here;
//! they travel as [`HandlerError`](crate::HandlerError) to whoever invoked the view.

use thiserror::Error;

/// Result type alias using [`ViewError`].
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised while deriving or registering a view.
#[derive(Error, Debug)]
pub enum ViewError {
    /// A declared type has no schema mapping.
    #[error("unsupported type: {type_name}")]
    UnsupportedType {
        /// Name of the offending type.
        type_name: String,
    },

    /// Two declared parameters share a name.
    #[error("duplicate parameter '{name}' in handler '{operation_id}'")]
    DuplicateParameter {
        /// The repeated parameter name.
        name: String,
        /// Operation the parameter belongs to.
        operation_id: String,
    },

    /// An HTTP method name could not be parsed.
    #[error("invalid HTTP method: {method}")]
    InvalidMethod {
        /// The rejected method name.
        method: String,
    },

    /// A path was registered twice in the same URL table.
    #[error("route already registered: {path}")]
    DuplicateRoute {
        /// The conflicting path.
        path: String,
    },

    /// A wire payload could not be serialized.
    #[error("failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An HTTP response could not be assembled.
    #[error("failed to build HTTP response: {0}")]
    Http(#[from] http::Error),
}

impl ViewError {
    /// Creates an unsupported type error.
    #[must_use]
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Creates a duplicate parameter error.
    #[must_use]
    pub fn duplicate_parameter(name: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self::DuplicateParameter {
            name: name.into(),
            operation_id: operation_id.into(),
        }
    }

    /// Creates an invalid method error.
    #[must_use]
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidMethod {
            method: method.into(),
        }
    }

    /// Creates a duplicate route error.
    #[must_use]
    pub fn duplicate_route(path: impl Into<String>) -> Self {
        Self::DuplicateRoute { path: path.into() }
    }
}
