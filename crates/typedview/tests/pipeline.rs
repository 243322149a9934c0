//! End-to-end tests: typed views registered in a URL table, dispatched and documented.

use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE};
use http::{Method, StatusCode};
use serde_json::{json, Value};
use typedview::config::ConfigLoader;
use typedview::prelude::*;

mod auth {
    use schemars::JsonSchema;
    use serde::Serialize;
    use typedview::{typed_view, Model};
    use typedview_core::Request;

    #[derive(Serialize, JsonSchema, Model)]
    pub struct SmsCodeResponse {
        pub account_found: bool,
    }

    /// Docs n stuff
    #[typed_view(methods = ["POST"])]
    pub fn send_sms_code1(
        _request: &Request,
        bare: Option<String>,
        #[default] mobile: String,
    ) -> anyhow::Result<SmsCodeResponse> {
        Ok(SmsCodeResponse {
            account_found: true,
        })
    }

    #[typed_view]
    pub fn send_sms_code2(_request: &Request, bare: Option<String>, mobile: String) -> SmsCodeResponse {
        SmsCodeResponse {
            account_found: true,
        }
    }
}

mod users {
    use schemars::JsonSchema;
    use serde::Serialize;
    use typedview::{typed_view, Model};
    use typedview_core::Request;

    #[derive(Serialize, JsonSchema, Model)]
    pub struct Address {
        pub city: String,
    }

    /// Update a user's address.
    #[typed_view(methods = ["PUT"])]
    pub fn update_address(request: &Request, address: Address, note: Option<String>) -> String {
        request.uri().path().to_string()
    }
}

fn request(method: Method, uri: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::new())
        .unwrap()
}

fn build_urls() -> UrlConf {
    let config = ConfigLoader::new().load().unwrap();

    let mut urls = UrlConf::with_adapter(config.views.adapter());
    urls.path(
        "auth/send-code",
        auth::SendSmsCode1View,
        Some(auth::SendSmsCode1View::METHODS),
    )
    .unwrap()
    .register("auth/send-code2", auth::SendSmsCode2View::view().unwrap())
    .unwrap()
    .path(
        "users/{id}/address",
        users::UpdateAddressView,
        Some(users::UpdateAddressView::METHODS),
    )
    .unwrap();

    let generator = OpenApiGenerator::from_config(&config.docs).title("drf_hello");
    let schema = schema_view(&generator, &urls).unwrap();
    urls.register(&config.docs.path, schema).unwrap();
    urls
}

#[test]
fn test_dispatch_flattens_model_response() {
    let urls = build_urls();
    let response = urls
        .dispatch(&request(Method::POST, "/auth/send-code"))
        .unwrap()
        .into_http()
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    let body: Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body, json!({ "account_found": true }));
}

#[test]
fn test_dispatch_rejects_undeclared_method() {
    let urls = build_urls();
    let response = urls
        .dispatch(&request(Method::GET, "/auth/send-code"))
        .unwrap()
        .into_http()
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[ALLOW], "POST");
}

#[test]
fn test_dispatch_templated_path_forwards_raw_value() {
    let urls = build_urls();
    let response = urls
        .dispatch(&request(Method::PUT, "/users/7/address"))
        .unwrap();

    assert_eq!(response.payload, Payload::Raw(json!("/users/7/address")));
}

#[test]
fn test_unknown_path_is_not_found() {
    let urls = build_urls();
    let response = urls.dispatch(&request(Method::GET, "/nope")).unwrap();
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[test]
fn test_openapi_document() {
    let urls = build_urls();
    let document = urls
        .dispatch(&request(Method::GET, "/openapi"))
        .unwrap()
        .payload
        .to_json();

    assert_eq!(document["openapi"], "3.1.0");
    assert_eq!(document["info"]["title"], "drf_hello");

    let post = &document["paths"]["/auth/send-code"]["post"];
    assert_eq!(post["operationId"], "auth.send_sms_code1");
    assert_eq!(post["description"], "Docs n stuff");
    let content = post["requestBody"]["content"].as_object().unwrap();
    let media: Vec<_> = content.keys().map(String::as_str).collect();
    assert_eq!(
        media,
        [
            "application/json",
            "application/x-www-form-urlencoded",
            "multipart/form-data"
        ]
    );
    assert_eq!(content["multipart/form-data"]["schema"]["required"], json!([]));

    let get = &document["paths"]["/auth/send-code2"]["get"];
    assert_eq!(get["operationId"], "auth.send_sms_code2");
    assert!(get.get("requestBody").is_none());

    let put = &document["paths"]["/users/{id}/address"]["put"];
    assert_eq!(put["parameters"][0]["name"], "id");
    assert_eq!(put["parameters"][0]["in"], "path");
    let schema = &put["requestBody"]["content"]["application/json"]["schema"];
    assert_eq!(schema["required"], json!(["address"]));
    assert_eq!(
        schema["properties"]["address"]["properties"]["city"]["type"],
        "string"
    );
    assert_eq!(schema["properties"]["note"], json!({ "type": "string" }));
}

#[test]
fn test_send_sms_code2_requires_mobile() {
    let binding = auth::SendSmsCode2View::view().unwrap();
    let schema = &binding.descriptor().request_body["application/json"].schema;
    assert_eq!(schema.required, ["mobile"]);
}
