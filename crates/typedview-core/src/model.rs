//! Structured payload types.

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ViewError, ViewResult};

/// A structured payload type that derives its own nested schema.
///
/// Models are usually declared with `#[derive(Serialize, JsonSchema, Model)]`. The schema comes
/// from [`schemars`] and is embedded in request-body documentation unchanged; a model returned
/// from a handler is flattened into a field mapping before it goes on the wire.
///
/// # Example
///
/// ```rust
/// use schemars::JsonSchema;
/// use serde::Serialize;
/// use typedview_core::Model;
///
/// #[derive(Serialize, JsonSchema)]
/// struct SendSmsResponse {
///     account_found: bool,
/// }
///
/// impl Model for SendSmsResponse {}
///
/// let record = SendSmsResponse { account_found: true }.to_record().unwrap();
/// assert_eq!(record["account_found"], serde_json::json!(true));
/// ```
pub trait Model: Serialize + JsonSchema + Sized {
    /// Returns the model's own JSON Schema.
    fn nested_schema() -> Value {
        schemars::schema_for!(Self).to_value()
    }

    /// Flattens an instance into a plain field mapping.
    fn to_record(&self) -> ViewResult<Map<String, Value>> {
        flatten(self)
    }
}

/// Serializes `value` and returns its top-level fields.
///
/// Fails with [`ViewError::Serialization`] when the value does not serialize to an object.
pub(crate) fn flatten<T: Serialize + ?Sized>(value: &T) -> ViewResult<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(ViewError::Serialization(serde::ser::Error::custom(format!(
            "model {} serialized to {} instead of an object",
            std::any::type_name::<T>(),
            json_kind(&other)
        )))),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, JsonSchema)]
    struct Account {
        id: u64,
        active: bool,
    }

    impl Model for Account {}

    #[derive(Serialize, JsonSchema)]
    struct Wrapped(u32);

    impl Model for Wrapped {}

    #[test]
    fn test_nested_schema_is_object() {
        let schema = Account::nested_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["id"]["type"], "integer");
        assert_eq!(schema["properties"]["active"]["type"], "boolean");
    }

    #[test]
    fn test_nested_schema_is_stable() {
        assert_eq!(Account::nested_schema(), Account::nested_schema());
    }

    #[test]
    fn test_to_record() {
        let record = Account { id: 7, active: true }.to_record().unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record["id"], 7);
        assert_eq!(record["active"], true);
    }

    #[test]
    fn test_to_record_rejects_non_object() {
        let err = Wrapped(3).to_record().unwrap_err();
        assert!(err.to_string().contains("a number"));
    }
}
