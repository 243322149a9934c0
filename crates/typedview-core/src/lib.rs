//! # Typedview Core
//!
//! Derives HTTP views and request-body documentation from a handler's declared types.
//!
//! A handler declares its parameters and return type once. From that declaration this crate
//! produces:
//!
//! - a [`HandlerSignature`] - the normalized parameter/return description ([`reflect`])
//! - a [`SchemaFragment`] per parameter ([`to_schema`])
//! - an [`OperationDescriptor`] for the documentation exporter ([`describe`])
//! - a [`ViewBinding`] that the URL table can invoke per request ([`adapt`])
//!
//! Everything is computed at registration time. Translation failures such as
//! [`ViewError::UnsupportedType`] are raised before an endpoint is ever registered.
//!
//! ## Example
//!
//! ```rust
//! use typedview_core::{
//!     adapt, DeclaredParameter, Handler, HandlerDeclaration, HandlerIdentity, HandlerResult,
//!     Reflect, Request,
//! };
//!
//! struct Ping;
//!
//! impl Handler for Ping {
//!     type Output = String;
//!
//!     fn declaration(&self) -> HandlerDeclaration {
//!         HandlerDeclaration::new(HandlerIdentity::new("app::health::views", "ping", None))
//!             .parameter(DeclaredParameter::new("echo", Some(<Option<String>>::descriptor()), false))
//!             .returns(String::descriptor())
//!     }
//!
//!     fn call(&self, _request: &Request) -> HandlerResult<String> {
//!         Ok("pong".to_string())
//!     }
//! }
//!
//! let binding = adapt(Ping, None).unwrap();
//! assert_eq!(binding.descriptor().operation_id, "health.ping");
//! ```

#![doc(html_root_url = "https://docs.rs/typedview-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod describe;
mod error;
mod model;
mod reflect;
mod response;
mod schema;
mod types;
mod urls;
mod view;

pub use describe::{
    describe, MediaSchema, ObjectSchema, OperationDescriptor, DEFAULT_CONTENT_TYPES,
};
pub use error::{ViewError, ViewResult};
pub use model::Model;
pub use reflect::{
    reflect, DeclaredParameter, HandlerDeclaration, HandlerIdentity, HandlerSignature,
    ParameterSpec,
};
pub use response::{Payload, ViewResponse};
pub use schema::{to_schema, SchemaFragment};
pub use types::{ModelSchema, PrimitiveKind, Reflect, TypeDescriptor};
pub use urls::UrlConf;
pub use view::{
    adapt, Adapter, Handler, HandlerError, HandlerResult, InvocableView, Request, ViewBinding,
};
