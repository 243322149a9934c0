//! Expansion of `#[derive(Model)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, DeriveInput};

/// Implements `Model` and `Reflect` for a serializable, schema-bearing type.
pub fn expand_model(item: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(item)?;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "Model cannot be derived for generic types",
        ));
    }

    let name = &input.ident;
    Ok(quote! {
        impl ::typedview_core::Model for #name {}

        impl ::typedview_core::Reflect for #name {
            fn descriptor() -> ::typedview_core::TypeDescriptor {
                ::typedview_core::TypeDescriptor::model::<Self>()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_model() {
        let expanded = expand_model(quote! {
            struct SmsCodeResponse {
                account_found: bool,
            }
        })
        .unwrap()
        .to_string();

        assert!(expanded.contains("Model for SmsCodeResponse"));
        assert!(expanded.contains("Reflect for SmsCodeResponse"));
    }

    #[test]
    fn test_generic_model_rejected() {
        let result = expand_model(quote! {
            struct Page<T> {
                items: T,
            }
        });
        assert!(result.is_err());
    }
}
