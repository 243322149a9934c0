//! Schema translation.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::{ViewError, ViewResult};
use crate::types::{PrimitiveKind, TypeDescriptor};

/// The JSON Schema fragment describing one declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaFragment {
    /// `{"type": "<primitive>"}`.
    Primitive(PrimitiveKind),
    /// A model's own schema, embedded unchanged.
    Nested(Value),
    /// `{}`, for values without type information.
    Empty,
}

impl SchemaFragment {
    /// Returns the fragment as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Primitive(kind) => serde_json::json!({ "type": kind.wire_name() }),
            Self::Nested(schema) => schema.clone(),
            Self::Empty => Value::Object(serde_json::Map::new()),
        }
    }
}

impl Serialize for SchemaFragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Primitive(kind) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", kind.wire_name())?;
                map.end()
            }
            Self::Nested(schema) => schema.serialize(serializer),
            Self::Empty => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Translates a type descriptor into its schema fragment.
///
/// Optionality does not change the fragment; it only affects the required list of the
/// enclosing request body. Fails with [`ViewError::UnsupportedType`] for types without a
/// mapping, without producing a partial result.
pub fn to_schema(ty: &TypeDescriptor) -> ViewResult<SchemaFragment> {
    match ty {
        TypeDescriptor::Optional(inner) => to_schema(inner),
        TypeDescriptor::Primitive(kind) => Ok(SchemaFragment::Primitive(*kind)),
        TypeDescriptor::Model(model) => Ok(SchemaFragment::Nested(model.nested_schema())),
        TypeDescriptor::Untyped => Ok(SchemaFragment::Empty),
        TypeDescriptor::Unsupported(type_name) => Err(ViewError::unsupported_type(type_name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::types::Reflect;
    use proptest::prelude::*;
    use schemars::JsonSchema;
    use serde_json::json;

    #[derive(serde::Serialize, JsonSchema)]
    struct Address {
        city: String,
        zip: Option<String>,
    }

    impl Model for Address {}

    impl Reflect for Address {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::model::<Self>()
        }
    }

    #[derive(serde::Serialize, JsonSchema)]
    struct Customer {
        name: String,
        address: Address,
    }

    impl Model for Customer {}

    #[test]
    fn test_primitive_fragments() {
        for kind in PrimitiveKind::ALL {
            let fragment = to_schema(&TypeDescriptor::Primitive(kind)).unwrap();
            assert_eq!(
                serde_json::to_value(&fragment).unwrap(),
                json!({ "type": kind.wire_name() })
            );
        }
    }

    #[test]
    fn test_untyped_is_empty_object() {
        let fragment = to_schema(&TypeDescriptor::Untyped).unwrap();
        assert_eq!(fragment, SchemaFragment::Empty);
        assert_eq!(serde_json::to_value(&fragment).unwrap(), json!({}));
    }

    #[test]
    fn test_model_delegates_to_provider() {
        let fragment = to_schema(&TypeDescriptor::model::<Customer>()).unwrap();
        assert_eq!(fragment, SchemaFragment::Nested(Customer::nested_schema()));
    }

    #[test]
    fn test_model_translation_is_idempotent() {
        let ty = TypeDescriptor::model::<Customer>();
        assert_eq!(to_schema(&ty).unwrap(), to_schema(&ty).unwrap());
    }

    #[test]
    fn test_optional_model_matches_model() {
        let optional = <Option<Address>>::descriptor();
        assert_eq!(
            to_schema(&optional).unwrap(),
            to_schema(&TypeDescriptor::model::<Address>()).unwrap()
        );
    }

    #[test]
    fn test_unsupported_fails() {
        let err = to_schema(&<Vec<String>>::descriptor()).unwrap_err();
        assert!(matches!(err, ViewError::UnsupportedType { .. }));
    }

    #[test]
    fn test_optional_unsupported_fails() {
        let err = to_schema(&<Option<Vec<u8>>>::descriptor()).unwrap_err();
        assert!(matches!(err, ViewError::UnsupportedType { .. }));
    }

    #[test]
    fn test_to_value_matches_serialize() {
        for fragment in [
            SchemaFragment::Primitive(PrimitiveKind::Float),
            SchemaFragment::Empty,
            SchemaFragment::Nested(json!({ "type": "object", "title": "X" })),
        ] {
            assert_eq!(fragment.to_value(), serde_json::to_value(&fragment).unwrap());
        }
    }

    #[derive(serde::Serialize, JsonSchema)]
    struct Customer2 {
        id: i64,
    }

    impl Model for Customer2 {}

    fn descriptor_strategy() -> impl Strategy<Value = TypeDescriptor> {
        prop_oneof![
            prop::sample::select(PrimitiveKind::ALL.to_vec()).prop_map(TypeDescriptor::Primitive),
            Just(TypeDescriptor::Untyped),
            Just(TypeDescriptor::model::<Customer2>()),
            "[a-z]{1,8}".prop_map(TypeDescriptor::Unsupported),
        ]
    }

    proptest! {
        #[test]
        fn prop_optional_does_not_change_fragment(ty in descriptor_strategy()) {
            let wrapped = TypeDescriptor::optional(ty.clone());
            match (to_schema(&wrapped), to_schema(&ty)) {
                (Ok(a), Ok(b)) => {
                    prop_assert_eq!(a, b);
                }
                (Err(_), Err(_)) => {}
                _ => {
                    prop_assert!(false, "optional changed translation outcome");
                }
            }
        }

        #[test]
        fn prop_translation_is_deterministic(ty in descriptor_strategy()) {
            prop_assert_eq!(to_schema(&ty).ok(), to_schema(&ty).ok());
        }
    }
}
