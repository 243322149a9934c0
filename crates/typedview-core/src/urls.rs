//! URL table mapping paths to view bindings.
//!
//! Paths are stored without leading or trailing slashes. A `{name}` segment matches any single
//! non-empty request path segment.

use indexmap::IndexMap;

use crate::error::{ViewError, ViewResult};
use crate::response::ViewResponse;
use crate::view::{Adapter, Handler, HandlerResult, Request, ViewBinding};

/// Ordered table of registered views.
///
/// # Example
///
/// ```rust,ignore
/// let mut urls = UrlConf::new();
/// urls.path("auth/send-code", SendSmsCode1View, Some(&["POST"]))?
///     .path("auth/send-code2", SendSmsCode2View, None)?;
///
/// let response = urls.dispatch(&request)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlConf {
    adapter: Adapter,
    routes: IndexMap<String, ViewBinding>,
}

impl UrlConf {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table whose [`path`](Self::path) adapts handlers with `adapter`.
    #[must_use]
    pub fn with_adapter(adapter: Adapter) -> Self {
        Self {
            adapter,
            routes: IndexMap::new(),
        }
    }

    /// Registers an already adapted binding under `path`.
    pub fn register(&mut self, path: &str, binding: ViewBinding) -> ViewResult<&mut Self> {
        let path = normalize(path);
        if self.routes.contains_key(path) {
            return Err(ViewError::duplicate_route(path));
        }

        tracing::debug!(
            path,
            operation_id = %binding.descriptor().operation_id,
            "registered view"
        );
        self.routes.insert(path.to_string(), binding);
        Ok(self)
    }

    /// Adapts `handler` and registers it under `path`.
    pub fn path<H: Handler>(
        &mut self,
        path: &str,
        handler: H,
        methods: Option<&[&str]>,
    ) -> ViewResult<&mut Self> {
        let binding = self.adapter.adapt(handler, methods)?;
        self.register(path, binding)
    }

    /// Looks up the binding registered under exactly `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ViewBinding> {
        self.routes.get(normalize(path))
    }

    /// Finds the binding whose pattern matches a request path.
    #[must_use]
    pub fn resolve(&self, request_path: &str) -> Option<(&str, &ViewBinding)> {
        let request_path = normalize(request_path);
        self.routes
            .get_key_value(request_path)
            .or_else(|| {
                self.routes
                    .iter()
                    .find(|(pattern, _)| matches_pattern(pattern, request_path))
            })
            .map(|(pattern, binding)| (pattern.as_str(), binding))
    }

    /// Routes a request to its view.
    ///
    /// Unknown paths get `404 Not Found` and undeclared methods `405 Method Not Allowed`.
    /// Handler errors are returned unchanged.
    pub fn dispatch(&self, request: &Request) -> HandlerResult<ViewResponse> {
        let path = request.uri().path();
        match self.resolve(path) {
            Some((pattern, binding)) => {
                tracing::trace!(path, pattern, method = %request.method(), "dispatching");
                binding.handle(request)
            }
            None => {
                tracing::debug!(path, "no view registered");
                Ok(ViewResponse::not_found())
            }
        }
    }

    /// Registered paths and bindings, in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &ViewBinding)> {
        self.routes
            .iter()
            .map(|(path, binding)| (path.as_str(), binding))
    }

    /// Number of registered paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn normalize(path: &str) -> &str {
    path.trim_matches('/')
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    let mut expected = pattern.split('/');
    let mut actual = path.split('/');
    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return true,
            (Some(p), Some(a)) => {
                let is_param = p.starts_with('{') && p.ends_with('}');
                if (is_param && a.is_empty()) || (!is_param && p != a) {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
