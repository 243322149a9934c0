//! # Typedview
//!
//! Declare a handler's parameters and return type once; get a callable view and the
//! OpenAPI request-body documentation from the same declaration.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use typedview::prelude::*;
//!
//! #[derive(Serialize, JsonSchema, Model)]
//! struct SmsCodeResponse {
//!     account_found: bool,
//! }
//!
//! /// Docs n stuff
//! #[typed_view(methods = ["POST"])]
//! fn send_sms_code1(
//!     request: &Request,
//!     bare: Option<String>,
//!     #[default] mobile: String,
//! ) -> anyhow::Result<SmsCodeResponse> {
//!     Ok(SmsCodeResponse { account_found: true })
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().with_env_prefix("TYPEDVIEW").load()?;
//!     init_logging(&LogConfig::from(&config.logging))?;
//!
//!     let mut urls = UrlConf::with_adapter(config.views.adapter());
//!     urls.path("auth/send-code", SendSmsCode1View, Some(SendSmsCode1View::METHODS))?;
//!
//!     let schema = schema_view(&OpenApiGenerator::from_config(&config.docs), &urls)?;
//!     urls.register(&config.docs.path, schema)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Crates
//!
//! - [`core`] - reflection, schema translation, view adaptation and the URL table
//! - [`docs`] - OpenAPI document generation and the schema view
//! - [`config`] - layered configuration
//! - [`telemetry`] - logging setup

#![doc(html_root_url = "https://docs.rs/typedview/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use typedview_core as core;

// Re-export documentation generation
pub use typedview_docs as docs;

// Re-export configuration
pub use typedview_config as config;

// Re-export logging setup
pub use typedview_telemetry as telemetry;

// Re-export macros
pub use typedview_macros::{typed_view, Model};

/// Prelude module for convenient imports.
///
/// ```rust
/// use typedview::prelude::*;
/// ```
pub mod prelude {
    pub use typedview_core::{
        adapt, Adapter, Handler, HandlerResult, Model, Payload, Reflect, Request, UrlConf,
        ViewBinding, ViewError, ViewResponse, ViewResult,
    };

    // Re-export macros
    pub use typedview_macros::{typed_view, Model};

    // Re-export documentation
    pub use typedview_docs::{schema_view, OpenApiGenerator};

    // Re-export configuration
    pub use typedview_config::{ConfigLoader, TypedViewConfig};

    // Re-export logging setup
    pub use typedview_telemetry::{init_logging, LogConfig};
}
