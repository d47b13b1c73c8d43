//! Path template matching
//!
//! Templates such as `/mapping/users/{userId}/orders/{orderId}` are split
//! into segments once. Literal segments compare exactly; `{name}` captures a
//! single non-empty segment, percent-decoded.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template; a missing leading `/` is added
    pub fn parse(template: &str) -> Self {
        let raw = if template.starts_with('/') {
            template.to_string()
        } else {
            format!("/{template}")
        };

        let segments = raw[1..]
            .split('/')
            .map(|seg| {
                seg.strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                    .map_or_else(
                        || Segment::Literal(seg.to_string()),
                        |name| Segment::Capture(name.to_string()),
                    )
            })
            .collect();

        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of placeholders; fewer means more specific
    pub fn captures(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Capture(_)))
            .count()
    }

    /// Match a request path, returning captured variables in template order
    pub fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
        let rest = path.strip_prefix('/')?;
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut vars = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Capture(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    let value = urlencoding::decode(part).map_or_else(
                        |_| part.to_string(),
                        std::borrow::Cow::into_owned,
                    );
                    vars.push((name.clone(), value));
                }
            }
        }
        Some(vars)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
