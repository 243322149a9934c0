//! Type descriptors and the [`Reflect`] trait.
//!
//! [`TypeDescriptor`] is the closed set of classifications the schema translator understands.
//! Rust types opt into it by implementing [`Reflect`]; the common primitives, `Option`, and the
//! collection types are covered here, and `#[derive(Model)]` covers user payload types.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use serde_json::Value;

use crate::model::Model;

/// Primitive type kinds with a direct JSON Schema counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Text.
    String,
    /// Whole numbers of any width.
    Int,
    /// Floating-point numbers.
    Float,
    /// `true` / `false`.
    Bool,
}

impl PrimitiveKind {
    /// All primitive kinds.
    pub const ALL: [Self; 4] = [Self::String, Self::Int, Self::Float, Self::Bool];

    /// Returns the JSON Schema `type` name for this kind.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "integer",
            Self::Float => "number",
            Self::Bool => "boolean",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Handle on a model type's own nested-schema derivation.
#[derive(Clone, Copy)]
pub struct ModelSchema {
    type_name: &'static str,
    provider: fn() -> Value,
}

impl ModelSchema {
    /// Creates a handle for the model type `M`.
    #[must_use]
    pub fn of<M: Model>() -> Self {
        Self {
            type_name: std::any::type_name::<M>(),
            provider: M::nested_schema,
        }
    }

    /// Full type name of the model.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Runs the model's schema derivation.
    #[must_use]
    pub fn nested_schema(&self) -> Value {
        (self.provider)()
    }
}

impl fmt::Debug for ModelSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSchema")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ModelSchema {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

impl Eq for ModelSchema {}

/// Classification of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// A primitive with a direct schema mapping.
    Primitive(PrimitiveKind),
    /// A structured payload that derives its own schema.
    Model(ModelSchema),
    /// A value that may be absent. Never wraps another `Optional`.
    Optional(Box<TypeDescriptor>),
    /// No type information was declared.
    Untyped,
    /// A declared type without a schema mapping.
    Unsupported(String),
}

impl TypeDescriptor {
    /// Descriptor for the model type `M`.
    #[must_use]
    pub fn model<M: Model>() -> Self {
        Self::Model(ModelSchema::of::<M>())
    }

    /// Wraps `inner` as optional.
    ///
    /// Optionality is a single level: wrapping an already optional descriptor returns it as is.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        match inner {
            Self::Optional(_) => inner,
            other => Self::Optional(Box::new(other)),
        }
    }

    /// Descriptor for the unsupported type `T`, named after its Rust type.
    #[must_use]
    pub fn unsupported<T: ?Sized>() -> Self {
        Self::Unsupported(std::any::type_name::<T>().to_string())
    }

    /// Returns `true` for `Optional` descriptors.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns `true` for `Model` descriptors.
    #[must_use]
    pub const fn is_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }
}

/// Maps a Rust type onto its [`TypeDescriptor`].
///
/// Implemented for strings, integers, floats, `bool`, `Option<T>`, `serde_json::Value`
/// (untyped) and common collections (unsupported). Payload structs get an implementation from
/// `#[derive(Model)]`.
pub trait Reflect {
    /// Returns the descriptor for `Self`.
    fn descriptor() -> TypeDescriptor;
}

macro_rules! reflect_primitive {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::Primitive(PrimitiveKind::$kind)
                }
            }
        )+
    };
}

reflect_primitive!(String => String, str, char);
reflect_primitive!(Int => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
reflect_primitive!(Float => f32, f64);
reflect_primitive!(Bool => bool);

impl<T: Reflect> Reflect for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::optional(T::descriptor())
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }
}

impl Reflect for Value {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Untyped
    }
}

impl Reflect for () {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Untyped
    }
}

macro_rules! reflect_unsupported {
    ($(<$($param:ident),+> $ty:ty),+ $(,)?) => {
        $(
            impl<$($param),+> Reflect for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::unsupported::<Self>()
                }
            }
        )+
    };
}

reflect_unsupported!(
    <T> Vec<T>,
    <T> [T],
    <T> HashSet<T>,
    <T> BTreeSet<T>,
    <K, V> HashMap<K, V>,
    <K, V> BTreeMap<K, V>,
    <A, B> (A, B),
    <A, B, C> (A, B, C),
);
