//! Binding descriptors
//!
//! Each route declares, once at startup, how every handler argument is
//! obtained: the source, the lookup key, the target kind, whether it is
//! required and what default applies. The binder executes this table as-is
//! for every request.

use std::fmt;

use super::record::{Record, RecordShape};
use crate::logger;

/// Where an argument comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// No annotation; resolved to `Query` or `Model` when the descriptor is built
    Implicit,
    /// Query string or url-encoded form field
    Query,
    /// Placeholder of the route's path template
    Path,
    Header,
    Cookie,
    /// Whole request body
    Body,
    /// Record bound field by field from request parameters
    Model,
    /// All parameters, first value per name
    ParamMap,
    /// All headers with all their values
    HeaderMap,
    Method,
    /// First `Accept-Language` tag
    Locale,
    /// Request headers together with the body text
    Entity,
    /// Raw request handle; the handler reads the request itself
    Request,
    /// Raw response writer; the handler writes the response itself
    Writer,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Implicit => "implicit",
            Self::Query => "query",
            Self::Path => "path",
            Self::Header => "header",
            Self::Cookie => "cookie",
            Self::Body => "body",
            Self::Model => "model",
            Self::ParamMap => "parameter map",
            Self::HeaderMap => "header map",
            Self::Method => "method",
            Self::Locale => "locale",
            Self::Entity => "entity",
            Self::Request => "request",
            Self::Writer => "writer",
        };
        f.write_str(s)
    }
}

/// Target type of an argument
#[derive(Debug, Clone, Copy)]
pub enum Kind {
    Text,
    /// Primitive int: cannot express absence
    Int,
    /// Nullable int: absence binds `None`
    NullableInt,
    Long,
    Bool,
    /// Every value of a repeated source
    TextList,
    Record(RecordShape),
}

impl Kind {
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Int | Self::NullableInt | Self::Long | Self::Bool
        )
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int => "int",
            Self::NullableInt => "nullable int",
            Self::Long => "long",
            Self::Bool => "boolean",
            Self::TextList => "text list",
            Self::Record(shape) => shape.name,
        }
    }
}

/// One handler argument
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Identifier the handler uses to fetch the argument
    pub name: String,
    /// Lookup key in the request; defaults to `name`
    pub key: String,
    pub source: Source,
    pub kind: Kind,
    pub required: bool,
    pub default: Option<String>,
    /// Apply `default` to present-but-empty values too
    pub default_on_empty: bool,
}

impl ParamSpec {
    fn new(name: &str, source: Source, required: bool) -> Self {
        Self {
            name: name.to_string(),
            key: name.to_string(),
            source,
            kind: Kind::Text,
            required,
            default: None,
            default_on_empty: false,
        }
    }

    /// Argument without a source annotation
    pub fn implicit(name: &str) -> Self {
        Self::new(name, Source::Implicit, false)
    }

    /// Query/form parameter, required unless told otherwise
    pub fn query(name: &str) -> Self {
        Self::new(name, Source::Query, true)
    }

    pub fn path(name: &str) -> Self {
        Self::new(name, Source::Path, true)
    }

    /// Header, optional unless told otherwise
    pub fn header(name: &str) -> Self {
        Self::new(name, Source::Header, false)
    }

    /// All values of a repeated header
    pub fn header_values(name: &str) -> Self {
        Self::new(name, Source::Header, false).kind(Kind::TextList)
    }

    pub fn cookie(name: &str) -> Self {
        Self::new(name, Source::Cookie, false)
    }

    /// Whole body as text; use [`ParamSpec::record`] for a decoded record
    pub fn body(name: &str) -> Self {
        Self::new(name, Source::Body, true)
    }

    /// Record bound from request parameters
    pub fn model<R: Record>(name: &str) -> Self {
        Self::new(name, Source::Model, false).record::<R>()
    }

    pub fn param_map(name: &str) -> Self {
        Self::new(name, Source::ParamMap, false)
    }

    pub fn header_map(name: &str) -> Self {
        Self::new(name, Source::HeaderMap, false)
    }

    pub fn method(name: &str) -> Self {
        Self::new(name, Source::Method, false)
    }

    pub fn locale(name: &str) -> Self {
        Self::new(name, Source::Locale, false)
    }

    pub fn entity(name: &str) -> Self {
        Self::new(name, Source::Entity, false)
    }

    pub fn request() -> Self {
        Self::new("request", Source::Request, false)
    }

    pub fn writer() -> Self {
        Self::new("response", Source::Writer, false)
    }

    /// Look the value up under a different name than the argument's
    #[must_use]
    pub fn key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn int(self) -> Self {
        self.kind(Kind::Int)
    }

    #[must_use]
    pub fn nullable_int(self) -> Self {
        self.kind(Kind::NullableInt)
    }

    #[must_use]
    pub fn long(self) -> Self {
        self.kind(Kind::Long)
    }

    #[must_use]
    pub fn record<R: Record>(self) -> Self {
        self.kind(Kind::Record(RecordShape::of::<R>()))
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Value used when the parameter is absent
    ///
    /// Like a declared default in most frameworks this also makes the
    /// parameter effectively optional.
    #[must_use]
    pub fn default_value(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    #[must_use]
    pub fn default_on_empty(mut self) -> Self {
        self.default_on_empty = true;
        self
    }

    /// Whether absence must be reported as `NullPrimitive`
    pub const fn is_null_primitive_trap(&self) -> bool {
        matches!(self.kind, Kind::Int) && !self.required && self.default.is_none()
    }
}

/// Resolved argument table of one route
#[derive(Debug, Clone, Default)]
pub struct Descriptor {
    params: Vec<ParamSpec>,
}

impl Descriptor {
    /// Resolve implicit sources and validate the table
    ///
    /// An argument without a source annotation is a query parameter when its
    /// kind is scalar and a model binding otherwise. Implicit arguments are
    /// never required, so an implicit primitive int falls into the
    /// null-primitive trap when absent.
    pub fn build(route: &str, params: Vec<ParamSpec>) -> Self {
        let params = params
            .into_iter()
            .map(|mut spec| {
                if spec.source == Source::Implicit {
                    if spec.kind.is_scalar() {
                        spec.source = Source::Query;
                    } else {
                        spec.source = Source::Model;
                    }
                    spec.required = false;
                }
                if spec.is_null_primitive_trap() {
                    logger::log_warning(&format!(
                        "Route {route}: optional int parameter '{}' has no default; absence will fail the request",
                        spec.name
                    ));
                }
                spec
            })
            .collect();

        Self { params }
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Whether the handler writes the response itself
    pub fn writes_raw(&self) -> bool {
        self.params.iter().any(|p| p.source == Source::Writer)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
