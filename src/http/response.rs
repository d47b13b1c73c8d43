//! HTTP response building module
//!
//! Builders for the responses the dispatcher emits. Builders never panic: a
//! builder error is logged and a bare response is returned instead. The raw
//! builder falls back to an empty 500, since its headers come from handlers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::media::APPLICATION_JSON;

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub status: u16,
    pub error: &'a str,
    pub message: String,
    pub path: &'a str,
}

/// Build a response with a body and content type
pub fn build_body_response(
    status: StatusCode,
    content_type: &str,
    body: impl Into<Bytes>,
    server_name: &str,
) -> Response<Full<Bytes>> {
    let body = body.into();
    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", body.len())
        .header("Server", server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a response with exactly the given status, headers and body
pub fn build_raw_response(
    status: StatusCode,
    headers: &[(String, String)],
    body: Bytes,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(status);
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        let mut fallback = Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    })
}

/// Build a JSON error response
///
/// `allow` is only used for 405 responses.
pub fn build_error_response(
    status: StatusCode,
    message: String,
    path: &str,
    allow: Option<&[String]>,
) -> Response<Full<Bytes>> {
    let reason = status.canonical_reason().unwrap_or("Error");
    let payload = ErrorBody {
        status: status.as_u16(),
        error: reason,
        message,
        path,
    };
    let body = serde_json::to_vec(&payload).unwrap_or_else(|e| {
        crate::logger::log_error(&format!("Failed to serialize error body: {e}"));
        reason.as_bytes().to_vec()
    });

    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", APPLICATION_JSON)
        .header("Content-Length", body.len());
    if let Some(methods) = allow {
        builder = builder.header("Allow", methods.join(", "));
    }

    builder.body(Full::new(Bytes::from(body))).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        let mut fallback = Response::new(Full::new(Bytes::from(reason)));
        *fallback.status_mut() = status;
        fallback
    })
}

/// Build 413 Payload Too Large response
pub fn build_413_response(path: &str, max_body_size: u64) -> Response<Full<Bytes>> {
    build_error_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        format!("Request body exceeds {max_body_size} bytes"),
        path,
        None,
    )
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
