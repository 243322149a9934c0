//! OpenAPI document types and generation.
//!
//! The types in this module follow the OpenAPI 3.1 specification:
//! <https://spec.openapis.org/oas/v3.1.0>
//!
//! Only the parts needed to describe request bodies derived from typed views are modelled.

use http::Method;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use typedview_config::DocsConfig;
use typedview_core::{UrlConf, ViewBinding};

use crate::error::{DocsError, DocsResult};

/// OpenAPI document root object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApi {
    /// OpenAPI version (always "3.1.0").
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Available servers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// API paths and operations.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

/// API metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Server information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL.
    pub url: String,
    /// Server description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations available on a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// TRACE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    fn slot(&mut self, method: &Method) -> Option<&mut Option<Operation>> {
        match *method {
            Method::GET => Some(&mut self.get),
            Method::PUT => Some(&mut self.put),
            Method::POST => Some(&mut self.post),
            Method::DELETE => Some(&mut self.delete),
            Method::OPTIONS => Some(&mut self.options),
            Method::HEAD => Some(&mut self.head),
            Method::PATCH => Some(&mut self.patch),
            Method::TRACE => Some(&mut self.trace),
            _ => None,
        }
    }
}

/// An API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation identifier.
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// Full description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses by status code.
    pub responses: IndexMap<String, Response>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// Query string parameter.
    Query,
    /// URL path parameter.
    Path,
    /// HTTP header.
    Header,
    /// Cookie.
    Cookie,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Parameter schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Content by media type.
    pub content: IndexMap<String, MediaType>,
}

/// Media type content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type.
    pub schema: Value,
}

/// Response definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Description (required).
    pub description: String,
}

/// OpenAPI document generator for a URL table.
///
/// # Example
///
/// ```rust,ignore
/// let generator = OpenApiGenerator::new()
///     .title("drf_hello")
///     .version("1.0.0");
/// let document = generator.generate(&urls)?;
/// ```
#[derive(Debug, Clone)]
pub struct OpenApiGenerator {
    title: String,
    version: String,
    description: Option<String>,
    servers: Vec<Server>,
}

impl Default for OpenApiGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenApiGenerator {
    /// Create a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&DocsConfig::default())
    }

    /// Create a generator from the documentation settings.
    #[must_use]
    pub fn from_config(config: &DocsConfig) -> Self {
        Self {
            title: config.title.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
            servers: Vec::new(),
        }
    }

    /// Set the API title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the API description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a server.
    #[must_use]
    pub fn server(mut self, url: impl Into<String>, description: Option<String>) -> Self {
        self.servers.push(Server {
            url: url.into(),
            description,
        });
        self
    }

    /// Generate a document describing every view registered in `urls`.
    ///
    /// Each declared method becomes one operation. The request body is documented only for
    /// methods that carry one (`POST`, `PUT` and `PATCH`).
    pub fn generate(&self, urls: &UrlConf) -> DocsResult<OpenApi> {
        let path_params = Regex::new(r"\{([^}]+)\}")?;
        let mut paths: IndexMap<String, PathItem> = IndexMap::new();

        for (path, binding) in urls.bindings() {
            let parameters = extract_path_parameters(&path_params, path);
            let path_item = paths.entry(format!("/{path}")).or_default();

            for method in binding.methods() {
                let operation = convert_operation(binding, method, parameters.clone())?;
                let slot = path_item.slot(method).ok_or_else(|| {
                    DocsError::invalid_operation(
                        &operation.operation_id,
                        format!("unknown HTTP method: {method}"),
                    )
                })?;
                *slot = Some(operation);
            }
        }

        tracing::debug!(paths = paths.len(), "generated OpenAPI document");

        Ok(OpenApi {
            openapi: "3.1.0".to_string(),
            info: Info {
                title: self.title.clone(),
                version: self.version.clone(),
                description: self.description.clone(),
            },
            servers: self.servers.clone(),
            paths,
        })
    }

    /// Generate the document as pretty-printed JSON.
    pub fn generate_json(&self, urls: &UrlConf) -> DocsResult<String> {
        let document = self.generate(urls)?;
        serde_json::to_string_pretty(&document).map_err(DocsError::from)
    }
}

fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

fn convert_operation(
    binding: &ViewBinding,
    method: &Method,
    parameters: Vec<Parameter>,
) -> DocsResult<Operation> {
    let descriptor = binding.descriptor();

    let request_body = if carries_body(method) && !descriptor.request_body.is_empty() {
        let content = descriptor
            .request_body
            .iter()
            .map(|(media_type, media)| {
                Ok((
                    media_type.clone(),
                    MediaType {
                        schema: serde_json::to_value(&media.schema)?,
                    },
                ))
            })
            .collect::<DocsResult<IndexMap<_, _>>>()?;

        Some(RequestBody {
            required: binding.signature().required().next().is_some(),
            content,
        })
    } else {
        None
    };

    let mut responses = IndexMap::new();
    responses.insert(
        "200".to_string(),
        Response {
            description: "Successful response".to_string(),
        },
    );

    Ok(Operation {
        operation_id: descriptor.operation_id.clone(),
        description: descriptor.description.clone(),
        parameters,
        request_body,
        responses,
    })
}

/// Extract path parameters from a path template like `users/{userId}`.
fn extract_path_parameters(pattern: &Regex, path: &str) -> Vec<Parameter> {
    pattern
        .captures_iter(path)
        .filter_map(|cap| cap.get(1))
        .map(|name| Parameter {
            name: name.as_str().to_string(),
            location: ParameterIn::Path,
            // Path parameters are always required
            required: true,
            schema: Some(serde_json::json!({ "type": "string" })),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use typedview_core::{
        DeclaredParameter, Handler, HandlerDeclaration, HandlerIdentity, HandlerResult, Reflect,
        Request,
    };

    struct SendCode;

    impl Handler for SendCode {
        type Output = bool;

        fn declaration(&self) -> HandlerDeclaration {
            HandlerDeclaration::new(HandlerIdentity::new(
                "drf_hello::auth::views",
                "send_sms_code1",
                Some("Docs n stuff"),
            ))
            .parameter(DeclaredParameter::new("bare", Some(<Option<String>>::descriptor()), false))
            .parameter(DeclaredParameter::new("mobile", Some(String::descriptor()), false))
        }

        fn call(&self, _request: &Request) -> HandlerResult<bool> {
            Ok(true)
        }
    }

    struct Profile;

    impl Handler for Profile {
        type Output = ();

        fn declaration(&self) -> HandlerDeclaration {
            HandlerDeclaration::new(HandlerIdentity::new("app::users", "profile", None))
        }

        fn call(&self, _request: &Request) -> HandlerResult<()> {
            Ok(())
        }
    }

    fn urls() -> UrlConf {
        let mut urls = UrlConf::new();
        urls.path("auth/send-code", SendCode, Some(&["GET", "POST"]))
            .unwrap()
            .path("users/{userId}/profile", Profile, None)
            .unwrap();
        urls
    }

    #[test]
    fn test_extract_path_parameters() {
        let pattern = Regex::new(r"\{([^}]+)\}").unwrap();

        let params = extract_path_parameters(&pattern, "users/{userId}/orders/{orderId}");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "userId");
        assert_eq!(params[1].name, "orderId");
        assert_eq!(params[0].location, ParameterIn::Path);
        assert!(params[0].required);

        assert!(extract_path_parameters(&pattern, "users").is_empty());
    }

    #[test]
    fn test_generator_builder() {
        let generator = OpenApiGenerator::new()
            .title("drf_hello")
            .version("1.0.0")
            .description("Hello API")
            .server("https://api.example.com", Some("Production".to_string()));

        assert_eq!(generator.title, "drf_hello");
        assert_eq!(generator.version, "1.0.0");
        assert_eq!(generator.servers.len(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = DocsConfig {
            title: "Hello".to_string(),
            version: "2.0.0".to_string(),
            description: Some("desc".to_string()),
            ..DocsConfig::default()
        };
        let generator = OpenApiGenerator::from_config(&config);
        assert_eq!(generator.title, "Hello");
        assert_eq!(generator.description.as_deref(), Some("desc"));
    }

    #[test]
    fn test_request_body_only_for_body_methods() {
        let document = OpenApiGenerator::new().generate(&urls()).unwrap();
        let item = &document.paths["/auth/send-code"];

        let get = item.get.as_ref().unwrap();
        assert_eq!(get.operation_id, "auth.send_sms_code1");
        assert!(get.request_body.is_none());

        let post = item.post.as_ref().unwrap();
        let body = post.request_body.as_ref().unwrap();
        assert!(body.required);
        assert_eq!(body.content.len(), 3);
        assert_eq!(
            body.content["application/json"].schema,
            json!({
                "type": "object",
                "properties": {
                    "bare": { "type": "string" },
                    "mobile": { "type": "string" }
                },
                "required": ["mobile"]
            })
        );
        assert!(post.responses.contains_key("200"));
    }

    #[test]
    fn test_templated_path_parameters() {
        let document = OpenApiGenerator::new().generate(&urls()).unwrap();
        let get = document.paths["/users/{userId}/profile"].get.as_ref().unwrap();

        assert_eq!(get.parameters.len(), 1);
        assert_eq!(get.parameters[0].name, "userId");
        assert!(get.description.is_none());
    }

    #[test]
    fn test_paths_in_registration_order() {
        let document = OpenApiGenerator::new().generate(&urls()).unwrap();
        let paths: Vec<_> = document.paths.keys().map(String::as_str).collect();
        assert_eq!(paths, ["/auth/send-code", "/users/{userId}/profile"]);
    }

    #[test]
    fn test_parameter_in_serialization() {
        let param = Parameter {
            name: "id".to_string(),
            location: ParameterIn::Query,
            required: false,
            schema: None,
        };

        let json = serde_json::to_string(&param).unwrap();
        assert!(json.contains("\"in\":\"query\""));
    }

    #[test]
    fn test_generate_json() {
        let json = OpenApiGenerator::new()
            .title("Test API")
            .generate_json(&urls())
            .unwrap();
        assert!(json.contains("3.1.0"));
        assert!(json.contains("Test API"));
        assert!(json.contains("\"operationId\": \"auth.send_sms_code1\""));
    }
}
