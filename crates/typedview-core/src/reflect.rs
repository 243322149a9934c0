//! Handler declarations and the type reflector.
//!
//! A [`HandlerDeclaration`] is what a handler's declaration site states about itself: its
//! identity, each parameter's name, declared type (if any) and default presence, and its return
//! type (if any). [`reflect`] normalizes that into a [`HandlerSignature`].

use crate::types::TypeDescriptor;

/// Where a handler is defined and what it says about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerIdentity {
    /// Module path of the defining module, `::`-separated (as produced by `module_path!()`).
    pub module_path: &'static str,
    /// The handler's name.
    pub name: &'static str,
    /// Free-text documentation attached to the handler.
    pub doc: Option<&'static str>,
}

impl HandlerIdentity {
    /// Creates a handler identity.
    #[must_use]
    pub const fn new(module_path: &'static str, name: &'static str, doc: Option<&'static str>) -> Self {
        Self {
            module_path,
            name,
            doc,
        }
    }

    /// Returns the operation id: the second module path segment, a dot, and the handler name.
    ///
    /// A module path with a single segment contributes that segment.
    #[must_use]
    pub fn operation_id(&self) -> String {
        let mut segments = self.module_path.split("::");
        let first = segments.next().unwrap_or_default();
        let segment = segments.next().unwrap_or(first);
        format!("{segment}.{}", self.name)
    }

    /// Returns the documentation text with surrounding whitespace removed, if any remains.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        self.doc
            .map(str::trim)
            .filter(|doc| !doc.is_empty())
            .map(str::to_string)
    }
}

/// One parameter as written at the declaration site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredParameter {
    /// Parameter name.
    pub name: String,
    /// Declared type, `None` when no annotation was given.
    pub annotation: Option<TypeDescriptor>,
    /// Whether a default value is declared.
    pub has_default: bool,
}

impl DeclaredParameter {
    /// Creates a declared parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, annotation: Option<TypeDescriptor>, has_default: bool) -> Self {
        Self {
            name: name.into(),
            annotation,
            has_default,
        }
    }
}

/// Everything a handler declares about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerDeclaration {
    /// Identity of the handler.
    pub identity: HandlerIdentity,
    /// Parameters in declaration order.
    pub parameters: Vec<DeclaredParameter>,
    /// Declared return type, `None` when no annotation was given.
    pub returns: Option<TypeDescriptor>,
}

impl HandlerDeclaration {
    /// Starts a declaration with no parameters and no return annotation.
    #[must_use]
    pub fn new(identity: HandlerIdentity) -> Self {
        Self {
            identity,
            parameters: Vec::new(),
            returns: None,
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: DeclaredParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the return annotation.
    #[must_use]
    pub fn returns(mut self, returns: TypeDescriptor) -> Self {
        self.returns = Some(returns);
        self
    }
}

/// A reflected parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Parameter name, unique within its signature.
    pub name: String,
    /// Normalized type.
    pub ty: TypeDescriptor,
    /// Whether a default value is declared.
    pub has_default: bool,
}

impl ParameterSpec {
    /// Returns `true` when a request body must carry this parameter.
    ///
    /// Parameters with a default, and optional parameters, are not required.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !self.has_default && !self.ty.is_optional()
    }
}

/// Normalized description of a handler's parameters and return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSignature {
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterSpec>,
    /// Return type, `Untyped` when not declared.
    pub return_type: TypeDescriptor,
}

impl HandlerSignature {
    /// Names of the required parameters, in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name.as_str())
    }
}

/// Normalizes a handler declaration into a signature.
///
/// Missing annotations become [`TypeDescriptor::Untyped`]; declaration order is preserved.
#[must_use]
pub fn reflect(declaration: &HandlerDeclaration) -> HandlerSignature {
    let parameters = declaration
        .parameters
        .iter()
        .map(|p| ParameterSpec {
            name: p.name.clone(),
            ty: p.annotation.clone().unwrap_or(TypeDescriptor::Untyped),
            has_default: p.has_default,
        })
        .collect();

    HandlerSignature {
        parameters,
        return_type: declaration
            .returns
            .clone()
            .unwrap_or(TypeDescriptor::Untyped),
    }
}
