//! Raw response writer handed to handlers that emit the response themselves

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::http::build_raw_response;

#[derive(Debug, Clone)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: Vec<(String, String)>,
    buffer: Vec<u8>,
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: Vec::new(),
            buffer: Vec::new(),
        }
    }
}

impl ResponseWriter {
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Replace every value of a header
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.add_header(name, value);
    }

    fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    pub fn write(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        build_raw_response(self.status, &self.headers, Bytes::from(self.buffer))
    }
}
