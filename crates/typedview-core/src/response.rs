//! Wire responses produced by views.

use bytes::Bytes;
use http::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use serde_json::{json, Map, Value};

use crate::error::ViewResult;

/// The body of a view response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A model flattened into its fields.
    Record(Map<String, Value>),
    /// Any other serialized return value, forwarded as is.
    Raw(Value),
}

impl Payload {
    /// Returns the payload as a JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Record(fields) => Value::Object(fields.clone()),
            Self::Raw(value) => value.clone(),
        }
    }
}

/// A normalized response returned by an invocable view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Extra response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub payload: Payload,
}

impl ViewResponse {
    /// A `200 OK` response carrying `payload`.
    #[must_use]
    pub fn ok(payload: Payload) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            payload,
        }
    }

    /// A `404 Not Found` response.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            headers: HeaderMap::new(),
            payload: Payload::Raw(json!({ "detail": "Not found." })),
        }
    }

    /// A `405 Method Not Allowed` response listing the allowed methods.
    #[must_use]
    pub fn method_not_allowed<'a>(
        method: &Method,
        allowed: impl IntoIterator<Item = &'a Method>,
    ) -> Self {
        let allow = allowed
            .into_iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&allow) {
            headers.insert(ALLOW, value);
        }

        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            headers,
            payload: Payload::Raw(json!({
                "detail": format!("Method \"{method}\" not allowed.")
            })),
        }
    }

    /// Serializes the response into an HTTP response with a JSON body.
    pub fn into_http(self) -> ViewResult<http::Response<Bytes>> {
        let body = serde_json::to_vec(&self.payload.to_json())?;

        let mut builder = http::Response::builder()
            .status(self.status)
            .header(CONTENT_TYPE, "application/json");
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers);
        }

        Ok(builder.body(Bytes::from(body))?)
    }
}
