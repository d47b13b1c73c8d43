//! Request condition matching
//!
//! A route narrows its path match with methods, parameter and header
//! predicates, the accepted request content types (`consumes`) and the
//! content types it can produce (`produces`).

use hyper::Method;

use crate::error::Mismatch;
use crate::http::media::{parse_accept, MediaType, OCTET_STREAM};
use crate::http::RequestParts;

/// One `params`/`headers` predicate
///
/// Syntax: `name` (present), `!name` (absent), `name=value` (equal),
/// `name!=value` (present and not equal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    name: String,
    value: Option<String>,
    negated: bool,
}

impl Expression {
    pub fn parse(expr: &str) -> Self {
        if let Some((name, value)) = expr.split_once("!=") {
            return Self {
                name: name.trim().to_string(),
                value: Some(value.trim().to_string()),
                negated: true,
            };
        }
        if let Some((name, value)) = expr.split_once('=') {
            return Self {
                name: name.trim().to_string(),
                value: Some(value.trim().to_string()),
                negated: false,
            };
        }
        expr.trim().strip_prefix('!').map_or_else(
            || Self {
                name: expr.trim().to_string(),
                value: None,
                negated: false,
            },
            |name| Self {
                name: name.trim().to_string(),
                value: None,
                negated: true,
            },
        )
    }

    /// Evaluate against the looked-up value of `name`
    fn matches(&self, actual: Option<&str>) -> bool {
        match (&self.value, actual) {
            (None, found) => found.is_some() != self.negated,
            (Some(_), None) => false,
            (Some(expected), Some(actual)) => (expected == actual) != self.negated,
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.value, self.negated) {
            (None, false) => write!(f, "{}", self.name),
            (None, true) => write!(f, "!{}", self.name),
            (Some(v), false) => write!(f, "{}={v}", self.name),
            (Some(v), true) => write!(f, "{}!={v}", self.name),
        }
    }
}

/// Everything a route requires of a request besides its path
#[derive(Debug, Clone, Default)]
pub struct RequestCondition {
    pub methods: Vec<Method>,
    pub params: Vec<Expression>,
    pub headers: Vec<Expression>,
    pub consumes: Vec<MediaType>,
    pub produces: Vec<MediaType>,
}

impl RequestCondition {
    /// HEAD is allowed wherever GET is
    pub fn allows_method(&self, method: &Method) -> bool {
        self.methods.is_empty()
            || self.methods.contains(method)
            || (*method == Method::HEAD && self.methods.contains(&Method::GET))
    }

    /// Check the non-method conditions in precedence order
    ///
    /// On success returns the content type to emit, if the route declares
    /// `produces`.
    pub fn check(&self, req: &RequestParts) -> Result<Option<MediaType>, Mismatch> {
        for expr in &self.params {
            if !expr.matches(req.param(&expr.name)) {
                return Err(Mismatch::Condition {
                    condition: format!("params: {expr}"),
                });
            }
        }

        for expr in &self.headers {
            if !expr.matches(req.header(&expr.name)) {
                return Err(Mismatch::Condition {
                    condition: format!("headers: {expr}"),
                });
            }
        }

        if !self.consumes.is_empty() {
            let content_type = req
                .content_type()
                .or_else(|| MediaType::parse(OCTET_STREAM))
                .ok_or_else(|| Mismatch::UnsupportedMediaType {
                    content_type: OCTET_STREAM.to_string(),
                })?;
            if !self.consumes.iter().any(|mt| mt.includes(&content_type)) {
                return Err(Mismatch::UnsupportedMediaType {
                    content_type: content_type.to_string(),
                });
            }
        }

        self.negotiate(req.header("accept"))
    }

    /// Pick the first declared `produces` type some `Accept` range matches
    fn negotiate(&self, accept: Option<&str>) -> Result<Option<MediaType>, Mismatch> {
        if self.produces.is_empty() {
            return Ok(None);
        }

        let Some(accept) = accept.filter(|a| !a.trim().is_empty()) else {
            return Ok(self.produces.first().cloned());
        };

        let ranges = parse_accept(accept);
        self.produces
            .iter()
            .find(|produced| ranges.iter().any(|range| range.includes(produced)))
            .cloned()
            .map(Some)
            .ok_or_else(|| Mismatch::NotAcceptable {
                accept: accept.to_string(),
            })
    }
}
