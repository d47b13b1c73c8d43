//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body limits, collection into a
//! [`RequestParts`] snapshot, dispatch, and the access log line.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::{Method, Request, Response};

use super::dispatcher::error_response;
use crate::config::AppState;
use crate::http::{self, RequestParts};
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let access_log = state.access_log_enabled();
    if access_log {
        logger::log_request(req.method(), req.uri(), req.version());
    }

    // 1. Reject oversized bodies before reading them
    let max_body_size = state.config.http.max_body_size;
    if let Some(resp) = check_body_size(&req, max_body_size) {
        return Ok(resp);
    }

    // 2. Log headers if enabled
    logger::log_headers(req.headers(), state.config.logging.show_headers);

    // 3. Collect and dispatch
    let path = req.uri().path().to_string();
    let parts = match http::collect(req, max_body_size).await {
        Ok(parts) => parts,
        Err(e) => return Ok(error_response(&e, &path)),
    };
    let dispatched = state.dispatcher.dispatch(&parts);
    let response = strip_head_body(&parts, dispatched.response);

    // 4. Access log
    if access_log {
        let mut entry = AccessLogEntry::from_request(peer.to_string(), &parts);
        entry.status = response.status().as_u16();
        entry.body_bytes = body_len(&response);
        entry.route = dispatched.route;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(req: &Request<Incoming>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let size = http::request::content_length(req.headers())?;
    if size > max_body_size {
        logger::log_error(&format!(
            "Request body too large: {size} bytes (max: {max_body_size})"
        ));
        return Some(http::build_413_response(req.uri().path(), max_body_size));
    }
    None
}

/// HEAD gets the GET response headers with an empty body
fn strip_head_body(req: &RequestParts, response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    if req.method != Method::HEAD {
        return response;
    }
    let (parts, _) = response.into_parts();
    Response::from_parts(parts, Full::new(Bytes::new()))
}

fn body_len(response: &Response<Full<Bytes>>) -> usize {
    use hyper::body::Body;
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::CONTENT_LENGTH;
    use hyper::StatusCode;

    #[test]
    fn test_head_keeps_headers_drops_body() {
        let req = RequestParts::builder(Method::HEAD, "/hello-basic").build();
        let resp = http::build_body_response(StatusCode::OK, "text/plain", Bytes::from("OK"), "test");
        let stripped = strip_head_body(&req, resp);
        assert_eq!(stripped.status(), StatusCode::OK);
        assert_eq!(stripped.headers()[CONTENT_LENGTH], "2");
        assert_eq!(body_len(&stripped), 0);
    }

    #[test]
    fn test_get_body_untouched() {
        let req = RequestParts::builder(Method::GET, "/hello-basic").build();
        let resp = http::build_body_response(StatusCode::OK, "text/plain", Bytes::from("OK"), "test");
        assert_eq!(body_len(&strip_head_body(&req, resp)), 2);
    }
}
