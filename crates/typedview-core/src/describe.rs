//! Operation descriptors for the documentation exporter.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{ViewError, ViewResult};
use crate::reflect::{HandlerIdentity, HandlerSignature};
use crate::schema::{to_schema, SchemaFragment};

/// Media types documented for every request body unless configured otherwise.
pub const DEFAULT_CONTENT_TYPES: [&str; 3] = [
    "application/json",
    "application/x-www-form-urlencoded",
    "multipart/form-data",
];

/// Object schema describing a request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSchema {
    /// Always `"object"`.
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    /// One fragment per parameter, in declaration order.
    pub properties: IndexMap<String, SchemaFragment>,
    /// Names of the required parameters, in declaration order.
    pub required: Vec<String>,
}

/// The schema documented for one media type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSchema {
    /// Request body schema.
    pub schema: ObjectSchema,
}

/// The documentation record of one registered operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDescriptor {
    /// `<module segment>.<handler name>`.
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// The handler's documentation text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Request body schema by media type.
    #[serde(rename = "requestBody")]
    pub request_body: IndexMap<String, MediaSchema>,
}

/// Builds the operation descriptor for a reflected handler.
///
/// Each parameter contributes a property translated with [`to_schema`]; parameters without a
/// default and without an optional type are listed as required. The same object schema is
/// documented under every entry of `content_types`.
///
/// Uniqueness of operation ids across handlers is not checked here.
pub fn describe<S: AsRef<str>>(
    signature: &HandlerSignature,
    identity: &HandlerIdentity,
    content_types: &[S],
) -> ViewResult<OperationDescriptor> {
    let operation_id = identity.operation_id();

    let mut seen = HashSet::with_capacity(signature.parameters.len());
    let mut properties = IndexMap::with_capacity(signature.parameters.len());
    for parameter in &signature.parameters {
        if !seen.insert(parameter.name.as_str()) {
            return Err(ViewError::duplicate_parameter(&parameter.name, operation_id));
        }
        properties.insert(parameter.name.clone(), to_schema(&parameter.ty)?);
    }

    let schema = ObjectSchema {
        schema_type: "object",
        properties,
        required: signature.required().map(str::to_string).collect(),
    };

    let request_body = content_types
        .iter()
        .map(|content_type| {
            (
                content_type.as_ref().to_string(),
                MediaSchema {
                    schema: schema.clone(),
                },
            )
        })
        .collect();

    Ok(OperationDescriptor {
        operation_id,
        description: identity.description(),
        request_body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{reflect, DeclaredParameter, HandlerDeclaration};
    use crate::types::Reflect;
    use serde_json::json;

    fn send_sms_code1() -> HandlerDeclaration {
        HandlerDeclaration::new(HandlerIdentity::new(
            "drf_hello::auth::views",
            "send_sms_code1",
            Some(" Docs n stuff "),
        ))
        .parameter(DeclaredParameter::new("bare", Some(<Option<String>>::descriptor()), false))
        .parameter(DeclaredParameter::new("mobile", Some(String::descriptor()), true))
    }

    #[test]
    fn test_describe_wire_shape() {
        let declaration = send_sms_code1();
        let descriptor =
            describe(&reflect(&declaration), &declaration.identity, &["application/json"]).unwrap();

        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "operationId": "auth.send_sms_code1",
                "description": "Docs n stuff",
                "requestBody": {
                    "application/json": {
                        "schema": {
                            "type": "object",
                            "properties": {
                                "bare": { "type": "string" },
                                "mobile": { "type": "string" }
                            },
                            "required": []
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_describe_default_content_types() {
        let declaration = send_sms_code1();
        let descriptor = describe(
            &reflect(&declaration),
            &declaration.identity,
            &DEFAULT_CONTENT_TYPES,
        )
        .unwrap();

        let media: Vec<_> = descriptor.request_body.keys().map(String::as_str).collect();
        assert_eq!(media, DEFAULT_CONTENT_TYPES);
        let schemas: Vec<_> = descriptor.request_body.values().collect();
        assert!(schemas.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_describe_omits_missing_description() {
        let declaration = HandlerDeclaration::new(HandlerIdentity::new("app::auth", "logout", None));
        let descriptor =
            describe(&reflect(&declaration), &declaration.identity, &["application/json"]).unwrap();

        let value = serde_json::to_value(&descriptor).unwrap();
        assert!(value.get("description").is_none());
        assert_eq!(
            value["requestBody"]["application/json"]["schema"]["properties"],
            json!({})
        );
    }

    #[test]
    fn test_describe_keeps_declaration_order() {
        let declaration = HandlerDeclaration::new(HandlerIdentity::new("app::orders", "create", None))
            .parameter(DeclaredParameter::new("zeta", Some(i64::descriptor()), false))
            .parameter(DeclaredParameter::new("alpha", Some(f64::descriptor()), false))
            .parameter(DeclaredParameter::new("mid", None, false));
        let descriptor =
            describe(&reflect(&declaration), &declaration.identity, &["application/json"]).unwrap();

        let schema = &descriptor.request_body["application/json"].schema;
        let names: Vec<_> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(schema.required, ["zeta", "alpha", "mid"]);
        assert_eq!(schema.properties["mid"], SchemaFragment::Empty);
    }

    #[test]
    fn test_describe_rejects_unsupported() {
        let declaration = HandlerDeclaration::new(HandlerIdentity::new("app::tags", "bulk", None))
            .parameter(DeclaredParameter::new("tags", Some(<Vec<String>>::descriptor()), false));

        let err = describe(&reflect(&declaration), &declaration.identity, &["application/json"])
            .unwrap_err();
        assert!(matches!(err, ViewError::UnsupportedType { .. }));
    }

    #[test]
    fn test_describe_rejects_duplicate_parameters() {
        let declaration = HandlerDeclaration::new(HandlerIdentity::new("app::auth", "login", None))
            .parameter(DeclaredParameter::new("user", Some(String::descriptor()), false))
            .parameter(DeclaredParameter::new("user", Some(String::descriptor()), true));

        let err = describe(&reflect(&declaration), &declaration.identity, &["application/json"])
            .unwrap_err();
        assert!(matches!(err, ViewError::DuplicateParameter { ref name, .. } if name == "user"));
    }
}
