//! Error types for the documentation crate.

use thiserror::Error;
use typedview_core::ViewError;

/// Errors that can occur during documentation generation.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to serialize the OpenAPI document.
    #[error("Failed to serialize OpenAPI document: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A registered view declares a method OpenAPI cannot describe.
    #[error("Invalid operation '{operation_id}': {reason}")]
    InvalidOperation {
        /// The operation ID that is invalid.
        operation_id: String,
        /// The reason the operation is invalid.
        reason: String,
    },

    /// The path parameter pattern failed to compile.
    #[error("Invalid path pattern: {0}")]
    PatternError(#[from] regex::Error),

    /// The schema view could not be adapted.
    #[error("Failed to adapt schema view: {0}")]
    ViewError(#[from] ViewError),
}

impl DocsError {
    /// Creates an invalid operation error.
    pub fn invalid_operation(operation_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOperation {
            operation_id: operation_id.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;
