//! Procedural macros for typedview handlers.
//!
//! # Overview
//!
//! `#[typed_view]` turns a plain function into a registrable view. The parameter list is read
//! once at compile time and becomes the handler's declaration, from which the request-body
//! documentation is derived. `#[derive(Model)]` marks a type whose schema is provided by
//! `schemars` and whose values are flattened into field mappings when returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use typedview::prelude::*;
//!
//! #[derive(Serialize, JsonSchema, Model)]
//! struct SmsCodeResponse {
//!     account_found: bool,
//! }
//!
//! /// Docs n stuff
//! #[typed_view(methods = ["POST"])]
//! fn send_sms_code1(
//!     request: &Request,
//!     bare: Option<String>,
//!     #[default] mobile: String,
//! ) -> anyhow::Result<SmsCodeResponse> {
//!     Ok(SmsCodeResponse { account_found: true })
//! }
//!
//! let binding = SendSmsCode1View::view()?;
//! ```

mod model;
mod parse;
mod view;

use proc_macro::TokenStream;

/// Marks a function as a typed view.
///
/// # Attributes
///
/// - `methods`: accepted HTTP methods (optional, defaults to `["GET"]`)
///
/// # Parameters
///
/// The parameter typed `&Request` (or marked `#[request]`) receives the inbound request.
/// Every other parameter is documented in the request-body schema but is not bound at call
/// time, so it is removed from the emitted function. Mark a parameter `#[default]` to leave it
/// out of the required list.
///
/// # Generated Code
///
/// For `fn send_sms_code1` the macro generates approximately:
///
/// ```rust,ignore
/// fn send_sms_code1(request: &Request) -> anyhow::Result<SmsCodeResponse> { /* body */ }
///
/// pub struct SendSmsCode1View;
///
/// impl SendSmsCode1View {
///     pub const METHODS: &'static [&'static str] = &["POST"];
///     pub fn view() -> ViewResult<ViewBinding> { adapt(Self, Some(Self::METHODS)) }
/// }
///
/// impl Handler for SendSmsCode1View {
///     type Output = SmsCodeResponse;
///     fn declaration(&self) -> HandlerDeclaration { /* name, doc, parameters, return */ }
///     fn call(&self, request: &Request) -> HandlerResult<SmsCodeResponse> {
///         send_sms_code1(request).map_err(Into::into)
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn typed_view(attr: TokenStream, item: TokenStream) -> TokenStream {
    view::expand_typed_view(attr.into(), item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives `Model` and `Reflect` for a type implementing `Serialize` and `JsonSchema`.
#[proc_macro_derive(Model)]
pub fn derive_model(item: TokenStream) -> TokenStream {
    model::expand_model(item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
