//! Media type parsing and matching
//!
//! Used for `consumes`/`produces` route conditions and for the content type
//! of emitted responses.

use std::fmt;

pub const TEXT_PLAIN_UTF8: &str = "text/plain;charset=UTF-8";
pub const TEXT_HTML_UTF8: &str = "text/html;charset=UTF-8";
pub const APPLICATION_JSON: &str = "application/json";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A `type/subtype` pair with parameters stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    pub kind: String,
    pub subtype: String,
}

impl MediaType {
    /// Parse `type/subtype[;params]`, lowercasing both parts
    ///
    /// # Examples
    /// ```
    /// use mvc_basic::http::media::MediaType;
    /// let json = MediaType::parse("Application/JSON; charset=utf-8").unwrap();
    /// assert_eq!(json.to_string(), "application/json");
    /// assert!(MediaType::parse("json").is_none());
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let essence = value.split(';').next()?.trim();
        let (kind, subtype) = essence.split_once('/')?;
        let (kind, subtype) = (kind.trim(), subtype.trim());
        if kind.is_empty() || subtype.is_empty() {
            return None;
        }
        Some(Self {
            kind: kind.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
        })
    }

    pub fn is_wildcard(&self) -> bool {
        self.kind == "*"
    }

    /// Whether `self` (possibly a wildcard range) covers `other`
    pub fn includes(&self, other: &Self) -> bool {
        if self.is_wildcard() {
            return true;
        }
        if self.kind != other.kind {
            return false;
        }
        if self.subtype == "*" || self.subtype == other.subtype {
            return true;
        }
        // "application/*+json" covers "application/problem+json"
        if let Some(suffix) = self.subtype.strip_prefix("*+") {
            return other
                .subtype
                .rsplit_once('+')
                .is_some_and(|(_, s)| s == suffix);
        }
        false
    }

    /// JSON or a `+json` structured syntax suffix
    pub fn is_json(&self) -> bool {
        self.kind == "application" && (self.subtype == "json" || self.subtype.ends_with("+json"))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)
    }
}

/// Parse an `Accept` header into its media ranges, ignoring quality values
///
/// Ranges with `q=0` are dropped since they explicitly refuse the type.
pub fn parse_accept(header: &str) -> Vec<MediaType> {
    header
        .split(',')
        .filter(|range| !is_refused(range))
        .filter_map(MediaType::parse)
        .collect()
}

fn is_refused(range: &str) -> bool {
    range.split(';').skip(1).any(|param| {
        param
            .trim()
            .strip_prefix("q=")
            .and_then(|q| q.trim().parse::<f32>().ok())
            .is_some_and(|q| q <= 0.0)
    })
}
