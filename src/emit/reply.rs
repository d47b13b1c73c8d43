//! Handler return values

use hyper::body::Bytes;
use hyper::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value as Json};

use crate::error::MvcError;
use crate::http::media::APPLICATION_JSON;

/// How a route's text and unit returns are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Text is the response body
    #[default]
    Body,
    /// Text names a view; unit renders the view named after the path
    View,
}

/// Fully specified response: status, headers and body are emitted as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntity {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl ResponseEntity {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// JSON entity with the given status
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Self, MvcError> {
        let body = serde_json::to_vec(value).map_err(MvcError::Serialization)?;
        Ok(Self::new(status, body).with_header("Content-Type", APPLICATION_JSON))
    }
}

/// Named view plus the model it renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelAndView {
    pub view: String,
    pub model: Map<String, Json>,
}

impl ModelAndView {
    pub fn new(view: &str) -> Self {
        Self {
            view: view.to_string(),
            model: Map::new(),
        }
    }

    #[must_use]
    pub fn add_object(mut self, name: &str, value: impl Into<Json>) -> Self {
        self.model.insert(name.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Json { status: StatusCode, value: Json },
    Entity(ResponseEntity),
    View(ModelAndView),
    /// Nothing returned; the writer or the request path decides the output
    Unit,
}

impl Reply {
    /// The conventional acknowledgement of the demo handlers
    pub fn ok() -> Self {
        Self::text("OK")
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn json<T: Serialize>(value: &T) -> Result<Self, MvcError> {
        Self::json_with_status(StatusCode::OK, value)
    }

    pub fn json_with_status<T: Serialize>(status: StatusCode, value: &T) -> Result<Self, MvcError> {
        let value = serde_json::to_value(value).map_err(MvcError::Serialization)?;
        Ok(Self::Json { status, value })
    }
}
