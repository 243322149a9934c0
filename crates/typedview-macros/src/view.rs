//! Expansion of `#[typed_view]`.

use heck::ToUpperCamelCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{FnArg, ItemFn, Type};

use crate::parse::{ViewAttrs, ViewFn};

/// Expands the `#[typed_view]` attribute macro.
///
/// Emits the function with only its request parameter, a unit struct named after it
/// (`send_code` becomes `SendCodeView`) and a `Handler` impl on that struct carrying the
/// statically built declaration.
pub fn expand_typed_view(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let attrs: ViewAttrs = syn::parse2(attr)?;
    let item_fn: ItemFn = syn::parse2(item)?;
    let view = ViewFn::parse(item_fn)?;

    Ok(generate_view_code(&attrs, &view))
}

fn generate_view_code(attrs: &ViewAttrs, view: &ViewFn) -> TokenStream {
    let fn_name = &view.name;
    let fn_name_str = fn_name.to_string();
    let vis = &view.item.vis;
    let struct_name = format_ident!("{}View", fn_name_str.to_upper_camel_case());

    let emitted_fn = emit_request_only_fn(view);

    let doc = match &view.doc {
        Some(doc) => quote! { ::core::option::Option::Some(#doc) },
        None => quote! { ::core::option::Option::None },
    };

    let parameters = view.params.iter().map(|param| {
        let name = param.name.to_string();
        let ty = &param.ty;
        let has_default = param.has_default;
        quote! {
            .parameter(::typedview_core::DeclaredParameter::new(
                #name,
                ::core::option::Option::Some(<#ty as ::typedview_core::Reflect>::descriptor()),
                #has_default,
            ))
        }
    });

    let (output, call) = match (view.unwrap_result_type(), &view.return_type) {
        (Some(ok), _) => (
            quote! { #ok },
            quote! { #fn_name(request).map_err(::core::convert::Into::into) },
        ),
        (None, Some(ty)) => (
            quote! { #ty },
            quote! { ::core::result::Result::Ok(#fn_name(request)) },
        ),
        (None, None) => (
            quote! { () },
            quote! {
                #fn_name(request);
                ::core::result::Result::Ok(())
            },
        ),
    };

    let returns = view.return_type.as_ref().map(|_| {
        quote! { .returns(<#output as ::typedview_core::Reflect>::descriptor()) }
    });

    let methods: Vec<String> = attrs
        .methods
        .clone()
        .unwrap_or_else(|| vec!["GET".to_string()]);

    let struct_doc = format!("View generated from [`{fn_name_str}`].");

    quote! {
        #emitted_fn

        #[doc = #struct_doc]
        #[derive(Debug, Clone, Copy, Default)]
        #vis struct #struct_name;

        impl #struct_name {
            /// HTTP methods accepted by this view.
            pub const METHODS: &'static [&'static str] = &[#(#methods),*];

            /// Adapts this handler into a registrable view binding.
            pub fn view() -> ::typedview_core::ViewResult<::typedview_core::ViewBinding> {
                ::typedview_core::adapt(Self, ::core::option::Option::Some(Self::METHODS))
            }
        }

        impl ::typedview_core::Handler for #struct_name {
            type Output = #output;

            fn declaration(&self) -> ::typedview_core::HandlerDeclaration {
                ::typedview_core::HandlerDeclaration::new(::typedview_core::HandlerIdentity::new(
                    ::core::module_path!(),
                    #fn_name_str,
                    #doc,
                ))
                #(#parameters)*
                #returns
            }

            fn call(
                &self,
                request: &::typedview_core::Request,
            ) -> ::typedview_core::HandlerResult<Self::Output> {
                #call
            }
        }
    }
}

/// Re-emits the function with the request as its sole parameter.
///
/// Documented parameters are not in scope in the body; they exist only in the declaration.
fn emit_request_only_fn(view: &ViewFn) -> TokenStream {
    let mut item = view.item.clone();
    let request: FnArg = match &view.request {
        Some(pat_type) => FnArg::Typed(pat_type.clone()),
        None => {
            let ty: Type = syn::parse_quote!(&::typedview_core::Request);
            syn::parse_quote!(_request: #ty)
        }
    };

    item.sig.inputs.clear();
    item.sig.inputs.push(request);
    quote! { #item }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(attr: TokenStream, item: TokenStream) -> String {
        expand_typed_view(attr, item)
            .unwrap_or_else(|e| panic!("expansion failed: {e}"))
            .to_string()
    }

    #[test]
    fn test_expand_basic_view() {
        let expanded = expand(
            quote! {},
            quote! {
                fn ping() -> String {
                    "pong".to_string()
                }
            },
        );
        assert!(expanded.contains("struct PingView"));
        assert!(expanded.contains("\"GET\""));
        assert!(expanded.contains("_request"));
    }

    #[test]
    fn test_expand_strips_documented_params() {
        let expanded = expand(
            quote! { methods = ["POST"] },
            quote! {
                fn send_sms_code1(request: &Request, bare: Option<String>, #[default] mobile: String)
                    -> Result<SmsCodeResponse, Error>
                {
                    todo!()
                }
            },
        );
        assert!(expanded.contains("struct SendSmsCode1View"));
        assert!(expanded.contains("fn send_sms_code1 (request : & Request)"));
        assert!(expanded.contains("\"mobile\""));
        assert!(expanded.contains("type Output = SmsCodeResponse"));
        assert!(!expanded.contains("# [default]"));
    }

    #[test]
    fn test_expand_unit_return() {
        let expanded = expand(quote! {}, quote! { fn logout(request: &Request) {} });
        assert!(expanded.contains("type Output = ()"));
        assert!(!expanded.contains(". returns"));
    }

    #[test]
    fn test_expand_rejects_bad_attrs() {
        let result = expand_typed_view(quote! { path = "/x" }, quote! { fn ping() {} });
        assert!(result.is_err());
    }
}
