//! A view serving the generated OpenAPI document.

use std::sync::Arc;

use serde_json::Value;
use typedview_core::{
    adapt, Handler, HandlerDeclaration, HandlerIdentity, HandlerResult, Request, UrlConf,
    ViewBinding,
};

use crate::error::DocsResult;
use crate::openapi::OpenApiGenerator;

/// Serves a document generated once from the URL table.
struct SchemaHandler {
    document: Arc<Value>,
}

impl Handler for SchemaHandler {
    type Output = Value;

    fn declaration(&self) -> HandlerDeclaration {
        HandlerDeclaration::new(HandlerIdentity::new(
            module_path!(),
            "openapi_schema",
            Some("OpenAPI document for the registered views."),
        ))
    }

    fn call(&self, _request: &Request) -> HandlerResult<Value> {
        Ok(Value::clone(&self.document))
    }
}

/// Builds a `GET` view serving the OpenAPI document for `urls`.
///
/// The document reflects the table at the time of the call; views registered afterwards are
/// not included.
///
/// # Example
///
/// ```rust,ignore
/// let schema = schema_view(&OpenApiGenerator::from_config(&config.docs), &urls)?;
/// urls.register(&config.docs.path, schema)?;
/// ```
pub fn schema_view(generator: &OpenApiGenerator, urls: &UrlConf) -> DocsResult<ViewBinding> {
    let document = serde_json::to_value(generator.generate(urls)?)?;
    let binding = adapt(
        SchemaHandler {
            document: Arc::new(document),
        },
        Some(&["GET"]),
    )?;
    Ok(binding)
}
