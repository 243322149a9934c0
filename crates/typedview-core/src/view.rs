//! Handlers and the view adapter.
//!
//! [`adapt`] turns a [`Handler`] into a [`ViewBinding`]: an invocable view paired with its
//! [`OperationDescriptor`] and HTTP method set. All derivation happens once, at adaptation time.
//!
//! The request-body schema documents the handler's declared parameters, but the view does not
//! parse the request body into them. The handler receives the raw [`Request`] and extracts what
//! it needs itself.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::Method;
use indexmap::IndexSet;
use serde::Serialize;

use crate::describe::{describe, OperationDescriptor, DEFAULT_CONTENT_TYPES};
use crate::error::{ViewError, ViewResult};
use crate::model::flatten;
use crate::reflect::{reflect, HandlerDeclaration, HandlerSignature};
use crate::response::{Payload, ViewResponse};

/// The inbound request handed to every view.
pub type Request = http::Request<Bytes>;

/// Error raised by a handler while serving a request.
pub type HandlerError = anyhow::Error;

/// Result type alias using [`HandlerError`].
pub type HandlerResult<T> = Result<T, HandlerError>;

/// A function with a declared signature that can serve requests.
///
/// Implementations are usually generated by the `#[typed_view]` attribute macro, which emits
/// [`declaration`](Handler::declaration) from the function's parameter and return types.
pub trait Handler: Send + Sync + 'static {
    /// The value returned on success.
    type Output: Serialize;

    /// Returns what the handler declares about itself.
    fn declaration(&self) -> HandlerDeclaration;

    /// Serves one request. The request is the handler's only argument.
    fn call(&self, request: &Request) -> HandlerResult<Self::Output>;
}

/// The callable registered with the URL table.
pub type InvocableView = Arc<dyn Fn(&Request) -> HandlerResult<ViewResponse> + Send + Sync>;

/// An adapted handler: invocable view, descriptor and method set.
#[derive(Clone)]
pub struct ViewBinding {
    view: InvocableView,
    signature: Arc<HandlerSignature>,
    descriptor: Arc<OperationDescriptor>,
    methods: IndexSet<Method>,
}

impl ViewBinding {
    /// The invocable view.
    #[must_use]
    pub fn view(&self) -> &InvocableView {
        &self.view
    }

    /// The reflected signature.
    #[must_use]
    pub fn signature(&self) -> &HandlerSignature {
        &self.signature
    }

    /// The documentation record.
    #[must_use]
    pub fn descriptor(&self) -> &OperationDescriptor {
        &self.descriptor
    }

    /// Declared HTTP methods, in declaration order.
    #[must_use]
    pub fn methods(&self) -> &IndexSet<Method> {
        &self.methods
    }

    /// Returns `true` if `method` is declared.
    ///
    /// `HEAD` is allowed wherever `GET` is declared and is served by the same view.
    #[must_use]
    pub fn allows(&self, method: &Method) -> bool {
        self.methods.contains(method)
            || (*method == Method::HEAD && self.methods.contains(&Method::GET))
    }

    /// Invokes the view directly, without checking the request method.
    ///
    /// Handler errors are returned unchanged.
    pub fn call(&self, request: &Request) -> HandlerResult<ViewResponse> {
        (self.view)(request)
    }

    /// Serves a request, answering undeclared methods with `405 Method Not Allowed`.
    pub fn handle(&self, request: &Request) -> HandlerResult<ViewResponse> {
        if !self.allows(request.method()) {
            tracing::debug!(
                operation_id = %self.descriptor.operation_id,
                method = %request.method(),
                "method not allowed"
            );
            return Ok(ViewResponse::method_not_allowed(
                request.method(),
                &self.methods,
            ));
        }
        self.call(request)
    }

    /// Splits the binding into its view and descriptor.
    #[must_use]
    pub fn into_parts(self) -> (InvocableView, Arc<OperationDescriptor>) {
        (self.view, self.descriptor)
    }
}

impl fmt::Debug for ViewBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewBinding")
            .field("operation_id", &self.descriptor.operation_id)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

/// Builds view bindings with a configurable set of documented media types.
#[derive(Debug, Clone)]
pub struct Adapter {
    content_types: Vec<String>,
}

impl Default for Adapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter {
    /// Creates an adapter documenting [`DEFAULT_CONTENT_TYPES`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            content_types: DEFAULT_CONTENT_TYPES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Replaces the documented media types.
    #[must_use]
    pub fn with_content_types<I, S>(mut self, content_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content_types = content_types.into_iter().map(Into::into).collect();
        self
    }

    /// The documented media types.
    #[must_use]
    pub fn content_types(&self) -> &[String] {
        &self.content_types
    }

    /// Adapts `handler` into a view binding.
    ///
    /// `methods` defaults to `GET`. Method names are case-insensitive; repeats are dropped.
    /// The signature is reflected and translated here, so an unsupported parameter type fails
    /// the adaptation and the handler never reaches the URL table.
    pub fn adapt<H: Handler>(&self, handler: H, methods: Option<&[&str]>) -> ViewResult<ViewBinding> {
        let declaration = handler.declaration();
        let methods = parse_methods(methods.unwrap_or(&["GET"]))?;

        let signature = reflect(&declaration);
        let descriptor = describe(&signature, &declaration.identity, &self.content_types)
            .map_err(|e| {
                tracing::error!(
                    handler = declaration.identity.name,
                    module = declaration.identity.module_path,
                    error = %e,
                    "failed to adapt handler"
                );
                e
            })?;

        let flatten_model = signature.return_type.is_model();
        let handler = Arc::new(handler);
        let view: InvocableView = Arc::new(move |request: &Request| {
            let output = handler.call(request)?;
            let payload = if flatten_model {
                Payload::Record(flatten(&output)?)
            } else {
                Payload::Raw(serde_json::to_value(&output)?)
            };
            Ok(ViewResponse::ok(payload))
        });

        tracing::debug!(
            operation_id = %descriptor.operation_id,
            methods = ?methods,
            parameters = signature.parameters.len(),
            "adapted handler"
        );

        Ok(ViewBinding {
            view,
            signature: Arc::new(signature),
            descriptor: Arc::new(descriptor),
            methods,
        })
    }
}

/// Adapts `handler` with the default media types.
///
/// See [`Adapter::adapt`].
pub fn adapt<H: Handler>(handler: H, methods: Option<&[&str]>) -> ViewResult<ViewBinding> {
    Adapter::new().adapt(handler, methods)
}

fn parse_methods(names: &[&str]) -> ViewResult<IndexSet<Method>> {
    names
        .iter()
        .map(|name| {
            Method::from_bytes(name.trim().to_ascii_uppercase().as_bytes())
                .map_err(|_| ViewError::invalid_method(*name))
        })
        .collect()
}
