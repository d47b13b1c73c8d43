//! End-to-end dispatch of the demo controllers, without sockets

use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use serde_json::Value as Json;

use mvc_basic::config::{AppState, Config};
use mvc_basic::emit::TemplateViews;
use mvc_basic::http::RequestParts;

fn state() -> AppState {
    let templates = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");
    AppState::with_views(Config::default(), Arc::new(TemplateViews::new(templates, ".html")))
}

async fn send(req: RequestParts) -> (StatusCode, String, String) {
    let response: Response<Full<Bytes>> = state().dispatcher.dispatch(&req).response;
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(uri: &str) -> (StatusCode, String, String) {
    send(RequestParts::builder(Method::GET, uri).build()).await
}

fn error_message(body: &str) -> String {
    let json: Json = serde_json::from_str(body).unwrap();
    json["message"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_any_method_mapping() {
    for method in [Method::GET, Method::POST, Method::DELETE] {
        let (status, content_type, body) =
            send(RequestParts::builder(method, "/hello-basic").build()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/plain;charset=UTF-8");
        assert_eq!(body, "OK");
    }
}

#[tokio::test]
async fn test_trailing_slash_is_a_different_path() {
    let (status, _, _) = get("/hello-basic/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_method_restriction() {
    let (status, _, _) = get("/mapping-get-v1").await;
    assert_eq!(status, StatusCode::OK);

    let out = state()
        .dispatcher
        .dispatch(&RequestParts::builder(Method::POST, "/mapping-get-v2").build());
    assert_eq!(out.response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let allow = out.response.headers()["allow"].to_str().unwrap();
    assert!(allow.contains("GET"));
}

#[tokio::test]
async fn test_path_variables() {
    let (status, _, body) = get("/mapping/userA").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "OK"));

    let (status, _, _) = get("/mapping/users/userA/orders/100").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = get("/mapping/users/userA/orders/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("orderId"));
}

#[tokio::test]
async fn test_param_and_header_conditions() {
    assert_eq!(get("/mapping-param").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get("/mapping-param?mode=release").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get("/mapping-param?mode=debug").await.0, StatusCode::OK);

    assert_eq!(get("/mapping-header").await.0, StatusCode::NOT_FOUND);
    let (status, _, _) = send(
        RequestParts::builder(Method::GET, "/mapping-header")
            .header("Mode", "debug")
            .build(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_consumes_rejects_other_content_types() {
    let (status, _, _) = send(
        RequestParts::builder(Method::POST, "/mapping-consume")
            .header("content-type", "text/plain")
            .body("hello")
            .build(),
    )
    .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (status, _, _) =
        send(RequestParts::builder(Method::POST, "/mapping-consume").build()).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (status, _, _) = send(
        RequestParts::builder(Method::POST, "/mapping-consume")
            .json("{}")
            .build(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_produces_negotiates_accept() {
    let (status, _, _) = send(
        RequestParts::builder(Method::POST, "/mapping-produce")
            .header("accept", "application/xml")
            .build(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);

    let (status, content_type, body) = send(
        RequestParts::builder(Method::POST, "/mapping-produce")
            .header("accept", "text/*")
            .build(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_headers_route_requires_host() {
    let (status, _, body) = send(
        RequestParts::builder(Method::GET, "/headers")
            .header("host", "localhost:8080")
            .header("accept-language", "ko-KR,ko;q=0.9")
            .header("cookie", "myCookie=yum")
            .build(),
    )
    .await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "OK"));

    let (status, _, body) = get("/headers").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("host"));
}

#[tokio::test]
async fn test_request_param_by_hand() {
    let (status, _, body) = get("/request-param-v1?username=hello&age=20").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "OK"));

    // nothing is bound, so the handler's own parse failures are server errors
    for uri in ["/request-param-v1?age=twenty", "/request-param-v1?username=hello"] {
        let (status, _, _) = get(uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
    }
}

#[tokio::test]
async fn test_required_params_rejected_before_handler() {
    let (status, content_type, body) = get("/request-param-v2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type, "application/json");
    assert!(error_message(&body).contains("username"));

    assert_eq!(get("/request-param-v2?username=kim&age=20").await.0, StatusCode::OK);
    assert_eq!(get("/request-param-v3?username=kim&age=abc").await.0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_implicit_primitive_without_value_is_server_error() {
    assert_eq!(get("/request-param-v4?username=kim&age=1").await.0, StatusCode::OK);
    assert_eq!(get("/request-param-v4?age=1").await.0, StatusCode::OK);
    assert_eq!(
        get("/request-param-v4?username=kim").await.0,
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_required_and_defaults() {
    assert_eq!(get("/request-param-required").await.0, StatusCode::BAD_REQUEST);
    // Present but empty still satisfies `required`
    assert_eq!(get("/request-param-required?username=").await.0, StatusCode::OK);

    assert_eq!(get("/request-param-default").await.0, StatusCode::OK);
    assert_eq!(get("/request-param-default?username=&age=").await.0, StatusCode::OK);
    assert_eq!(get("/request-param-map?username=a&username=b").await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_model_attribute_binding() {
    assert_eq!(get("/model-attribute-v1?username=hello&age=20").await.0, StatusCode::OK);
    assert_eq!(get("/model-attribute-v1?username=hello").await.0, StatusCode::OK);
    assert_eq!(get("/model-attribute-v2").await.0, StatusCode::OK);

    let (status, _, body) = get("/model-attribute-v2?age=old").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("age"));
}

#[tokio::test]
async fn test_form_body_binds_like_query() {
    let (status, _, _) = send(
        RequestParts::builder(Method::POST, "/model-attribute-v1")
            .form("username=hello&age=20")
            .build(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_request_body_string_versions() {
    for uri in [
        "/request-body-string-v1",
        "/request-body-string-v2",
        "/request-body-string-v3",
        "/request-body-string-v4",
    ] {
        let (status, _, body) = send(
            RequestParts::builder(Method::POST, uri)
                .header("content-type", "text/plain")
                .body("hello")
                .build(),
        )
        .await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "OK"), "{uri}");
    }

    // Required body missing
    let (status, _, _) =
        send(RequestParts::builder(Method::POST, "/request-body-string-v4").build()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_body_json_versions() {
    let payload = r#"{"username":"hello","age":20}"#;
    for uri in [
        "/request-body-json-v1",
        "/request-body-json-v2",
        "/request-body-json-v3",
        "/request-body-json-v4",
    ] {
        let (status, _, body) =
            send(RequestParts::builder(Method::POST, uri).json(payload).build()).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "OK"), "{uri}");
    }

    for uri in [
        "/request-body-json-v1",
        "/request-body-json-v2",
        "/request-body-json-v3",
        "/request-body-json-v4",
    ] {
        let (status, _, _) =
            send(RequestParts::builder(Method::POST, uri).json("{not json").build()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_json_echo() {
    let (status, content_type, body) = send(
        RequestParts::builder(Method::POST, "/request-body-json-v5")
            .json(r#"{"username":"userA","age":20}"#)
            .build(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    let json: Json = serde_json::from_str(&body).unwrap();
    assert_eq!(json, serde_json::json!({"username": "userA", "age": 20}));

    let (status, _, body) = send(
        RequestParts::builder(Method::POST, "/request-body-json-v5")
            .json(r#"{"username":"partial"}"#)
            .build(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: Json = serde_json::from_str(&body).unwrap();
    assert_eq!(json, serde_json::json!({"username": "partial", "age": 0}));
}

#[tokio::test]
async fn test_record_body_requires_json_content_type() {
    for uri in [
        "/request-body-json-v3",
        "/request-body-json-v4",
        "/request-body-json-v5",
    ] {
        let (status, _, _) = send(
            RequestParts::builder(Method::POST, uri)
                .header("content-type", "text/plain")
                .body(r#"{"username":"userA","age":20}"#)
                .build(),
        )
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE, "{uri}");

        let (status, _, _) = send(
            RequestParts::builder(Method::POST, uri)
                .body(r#"{"username":"userA","age":20}"#)
                .build(),
        )
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE, "{uri} without content type");
    }
}

#[tokio::test]
async fn test_null_record_fields_take_zero_values() {
    let (status, _, body) = send(
        RequestParts::builder(Method::POST, "/request-body-json-v5")
            .json(r#"{"username":"userA","age":null}"#)
            .build(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: Json = serde_json::from_str(&body).unwrap();
    assert_eq!(json, serde_json::json!({"username": "userA", "age": 0}));
}

#[tokio::test]
async fn test_response_body_shapes() {
    for uri in [
        "/response-body-string-v1",
        "/response-body-string-v2",
        "/response-body-string-v3",
    ] {
        let (status, content_type, body) = get(uri).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "OK"), "{uri}");
        assert_eq!(content_type, "text/plain;charset=UTF-8", "{uri}");
    }

    for uri in ["/response-body-json-v1", "/response-body-json-v2"] {
        let (status, content_type, body) = get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        let json: Json = serde_json::from_str(&body).unwrap();
        assert_eq!(json, serde_json::json!({"username": "userA", "age": 20}));
    }
}

#[tokio::test]
async fn test_views() {
    let (status, content_type, body) = get("/response-view-v1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert!(body.contains("<p>hello!</p>"));

    let (status, _, body) = get("/response-view-v2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p></p>"));

    let (status, _, body) = get("/response/hello").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Title</title>"));
}

#[tokio::test]
async fn test_log_test_and_unknown_path() {
    assert_eq!(get("/log-test").await.0, StatusCode::OK);

    let (status, _, body) = get("/no-such-page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Json = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], 404);
    assert_eq!(json["path"], "/no-such-page");
}
