//! Owned request snapshot
//!
//! The hyper request is collected once into [`RequestParts`]; routing,
//! binding and handlers only ever see this snapshot.

use std::borrow::Cow;

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use hyper::{Method, Request, Uri, Version};

use super::media::{MediaType, FORM_URLENCODED};
use crate::error::MvcError;

#[derive(Debug, Clone)]
pub struct RequestParts {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub version: Version,
    pub headers: HeaderMap,
    /// Query string parameters followed by url-encoded form fields, in order
    pub params: Vec<(String, String)>,
    pub cookies: Vec<(String, String)>,
    pub body: Bytes,
}

impl RequestParts {
    pub fn new(method: Method, uri: &Uri, version: Version, headers: HeaderMap, body: Bytes) -> Self {
        let query = uri.query().map(ToString::to_string);
        let mut params = query.as_deref().map(parse_query_params).unwrap_or_default();

        let is_form = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(MediaType::parse)
            .is_some_and(|mt| mt.to_string() == FORM_URLENCODED);
        if is_form {
            params.extend(parse_query_params_bytes(&body));
        }

        let cookies = parse_cookies(&headers);

        Self {
            method,
            path: uri.path().to_string(),
            query,
            version,
            headers,
            params,
            cookies,
            body,
        }
    }

    /// Start building a request by hand (tests, internal forwarding)
    pub fn builder(method: Method, uri: &str) -> RequestBuilder {
        RequestBuilder {
            method,
            uri: uri.to_string(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// First value of a request parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn param_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First value of a header (case-insensitive name)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Every value of a repeated header, in arrival order
    pub fn header_values(&self, name: &str) -> Vec<String> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(ToString::to_string)
            .collect()
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<MediaType> {
        self.header(CONTENT_TYPE.as_str()).and_then(MediaType::parse)
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Path plus query string, as it appeared on the request line
    pub fn uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }
}

/// Hand-assembled request, mostly for tests
pub struct RequestBuilder {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestBuilder {
    /// Append a header; invalid names or values are skipped
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn json(self, body: &str) -> Self {
        self.header("content-type", "application/json")
            .body(body.to_string())
    }

    #[must_use]
    pub fn form(self, body: &str) -> Self {
        self.header("content-type", FORM_URLENCODED)
            .body(body.to_string())
    }

    pub fn build(self) -> RequestParts {
        let uri = self.uri.parse::<Uri>().unwrap_or_else(|_| Uri::from_static("/"));
        RequestParts::new(self.method, &uri, Version::HTTP_11, self.headers, self.body)
    }
}

/// Collect a hyper request into an owned snapshot, enforcing the body limit
pub async fn collect(req: Request<Incoming>, max_body_size: u64) -> Result<RequestParts, MvcError> {
    let (parts, body) = req.into_parts();
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);

    let body = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            return Err(MvcError::PayloadTooLarge {
                size: content_length(&parts.headers).unwrap_or(max_body_size.saturating_add(1)),
                max: max_body_size,
            });
        }
        Err(e) => return Err(MvcError::MessageNotReadable(e.to_string())),
    };

    Ok(RequestParts::new(
        parts.method,
        &parts.uri,
        parts.version,
        parts.headers,
        body,
    ))
}

pub fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(hyper::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Parse a query string or url-encoded form body, keeping duplicates in order
pub fn parse_query_params(query: &str) -> Vec<(String, String)> {
    parse_query_params_bytes(query.as_bytes())
}

fn parse_query_params_bytes(input: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(input)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Parse every `Cookie` header into name/value pairs
pub fn parse_cookies(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|line| line.split(';'))
        .filter_map(|pair| {
            let mut parts = pair.trim().splitn(2, '=');
            let name = parts.next()?.trim();
            if name.is_empty() {
                return None;
            }
            let value = parts.next().unwrap_or("").trim().trim_matches('"');
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}
