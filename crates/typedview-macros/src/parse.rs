//! Parsing utilities for view macros.
//!
//! This module provides parsing for `#[typed_view]` attributes and handler signatures.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Expr, ExprLit, FnArg, GenericArgument, Ident, ItemFn, Lit, Meta, Pat, PatIdent,
    PatType, PathArguments, ReturnType, Token, Type,
};

/// Parsed `#[typed_view]` attributes.
#[derive(Debug, Default)]
pub struct ViewAttrs {
    /// Accepted HTTP methods, as written.
    pub methods: Option<Vec<String>>,
}

impl Parse for ViewAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut methods = None;

        let meta_list: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in meta_list {
            match meta {
                Meta::NameValue(nv) => {
                    let ident = nv
                        .path
                        .get_ident()
                        .ok_or_else(|| syn::Error::new(nv.path.span(), "expected identifier"))?
                        .to_string();

                    match ident.as_str() {
                        "methods" => {
                            if methods.is_some() {
                                return Err(syn::Error::new(
                                    nv.path.span(),
                                    "duplicate attribute: methods",
                                ));
                            }
                            methods = Some(parse_string_array(&nv.value)?);
                        }
                        _ => {
                            return Err(syn::Error::new(
                                nv.path.span(),
                                format!("unknown attribute: {ident}"),
                            ))
                        }
                    }
                }
                _ => return Err(syn::Error::new(meta.span(), "expected name = value")),
            }
        }

        Ok(Self { methods })
    }
}

fn parse_string_array(expr: &Expr) -> syn::Result<Vec<String>> {
    let Expr::Array(array) = expr else {
        return Err(syn::Error::new(
            expr.span(),
            "expected an array of string literals",
        ));
    };

    array
        .elems
        .iter()
        .map(|elem| match elem {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => Ok(s.value()),
            _ => Err(syn::Error::new(elem.span(), "expected string literal")),
        })
        .collect()
}

/// A documented handler parameter.
#[derive(Debug)]
pub struct ViewParam {
    /// The parameter name.
    pub name: Ident,
    /// The declared type.
    pub ty: Type,
    /// Whether the parameter carries `#[default]`.
    pub has_default: bool,
}

/// Parsed handler function information.
#[derive(Debug)]
pub struct ViewFn {
    /// The function name.
    pub name: Ident,
    /// Documentation text gathered from `///` comments.
    pub doc: Option<String>,
    /// The parameter receiving the raw request, if declared.
    pub request: Option<PatType>,
    /// Documented parameters, in declaration order.
    pub params: Vec<ViewParam>,
    /// The declared return type.
    pub return_type: Option<Type>,
    /// The original function item.
    pub item: ItemFn,
}

impl ViewFn {
    /// Parses an `ItemFn` into a `ViewFn`.
    pub fn parse(item: ItemFn) -> syn::Result<Self> {
        let sig = &item.sig;

        if let Some(asyncness) = sig.asyncness {
            return Err(syn::Error::new(
                asyncness.span,
                "typed views must be synchronous functions",
            ));
        }
        if !sig.generics.params.is_empty() {
            return Err(syn::Error::new(
                sig.generics.span(),
                "typed views cannot be generic",
            ));
        }

        let mut request = None;
        let mut params = Vec::new();
        for arg in &sig.inputs {
            let FnArg::Typed(pat_type) = arg else {
                return Err(syn::Error::new(
                    arg.span(),
                    "typed views cannot have self parameter",
                ));
            };

            if is_request_param(pat_type) {
                if request.is_some() {
                    return Err(syn::Error::new(
                        pat_type.span(),
                        "only one request parameter is allowed",
                    ));
                }
                let mut pat_type = pat_type.clone();
                pat_type.attrs.retain(|attr| !attr.path().is_ident("request"));
                request = Some(pat_type);
            } else {
                params.push(ViewParam {
                    name: param_name(&pat_type.pat)?,
                    ty: (*pat_type.ty).clone(),
                    has_default: has_default_attr(&pat_type.attrs),
                });
            }
        }

        let return_type = match &sig.output {
            ReturnType::Default => None,
            ReturnType::Type(_, ty) => Some((**ty).clone()),
        };

        Ok(Self {
            name: sig.ident.clone(),
            doc: collect_doc(&item.attrs),
            request,
            params,
            return_type,
            item,
        })
    }

    /// Returns the success type if the return type is a `Result` alias.
    ///
    /// Both `Result<T, E>` and single-argument aliases such as `anyhow::Result<T>` are
    /// recognized.
    pub fn unwrap_result_type(&self) -> Option<&Type> {
        if let Some(Type::Path(type_path)) = &self.return_type {
            if let Some(segment) = type_path.path.segments.last() {
                if segment.ident.to_string().ends_with("Result") {
                    if let PathArguments::AngleBracketed(args) = &segment.arguments {
                        if let Some(GenericArgument::Type(ok)) = args.args.first() {
                            return Some(ok);
                        }
                    }
                }
            }
        }
        None
    }
}

fn is_request_param(pat_type: &PatType) -> bool {
    if pat_type.attrs.iter().any(|attr| attr.path().is_ident("request")) {
        return true;
    }

    // `&Request` is picked up without an attribute.
    if let Type::Reference(reference) = &*pat_type.ty {
        if let Type::Path(type_path) = &*reference.elem {
            if let Some(segment) = type_path.path.segments.last() {
                return segment.ident == "Request";
            }
        }
    }
    false
}

fn param_name(pat: &Pat) -> syn::Result<Ident> {
    match pat {
        Pat::Ident(PatIdent { ident, .. }) => Ok(ident.clone()),
        _ => Err(syn::Error::new(
            pat.span(),
            "documented parameters must be plain identifiers",
        )),
    }
}

fn has_default_attr(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident("default"))
}

fn collect_doc(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
