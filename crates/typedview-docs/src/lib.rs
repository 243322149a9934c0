//! # Typedview Docs
//!
//! OpenAPI document generation for views registered in a [`UrlConf`](typedview_core::UrlConf).
//!
//! Every registered view already carries an operation descriptor built when it was adapted.
//! This crate assembles those descriptors into an OpenAPI 3.1 document and can serve the
//! document as a view of its own.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use typedview_docs::{schema_view, OpenApiGenerator};
//!
//! let generator = OpenApiGenerator::new()
//!     .title("drf_hello")
//!     .version("1.0.0");
//!
//! let schema = schema_view(&generator, &urls)?;
//! urls.register("openapi", schema)?;
//! ```

mod error;
mod openapi;
mod schema_view;

pub use error::{DocsError, DocsResult};
pub use openapi::{
    Info, MediaType, OpenApi, OpenApiGenerator, Operation, Parameter, ParameterIn, PathItem,
    RequestBody, Response, Server,
};
pub use schema_view::schema_view;
