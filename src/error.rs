//! Error taxonomy
//!
//! Every failure that can happen while selecting a route, binding arguments,
//! running a handler or emitting a response maps to exactly one HTTP status.

use hyper::StatusCode;
use thiserror::Error;

use crate::binding::Source;
use crate::emit::ViewError;

/// Why no route accepted the request
///
/// Variants are ordered by how far the request got through route selection;
/// the dispatcher reports the mismatch of the route that got furthest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
    /// No template matched the path
    #[error("No mapping for path")]
    NotFound,
    /// A template matched but the method is not allowed
    #[error("Request method not supported (allowed: {})", .allowed.join(", "))]
    MethodNotAllowed { allowed: Vec<String> },
    /// A `params`/`headers` predicate failed
    #[error("Request does not satisfy condition '{condition}'")]
    Condition { condition: String },
    /// `consumes` did not match the request content type
    #[error("Content type '{content_type}' not supported")]
    UnsupportedMediaType { content_type: String },
    /// `produces` did not match any `Accept` range
    #[error("No acceptable representation for '{accept}'")]
    NotAcceptable { accept: String },
}

impl Mismatch {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::Condition { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
        }
    }

    /// Position in the route selection pipeline
    pub(crate) const fn stage(&self) -> u8 {
        match self {
            Self::NotFound => 0,
            Self::MethodNotAllowed { .. } => 1,
            Self::Condition { .. } => 2,
            Self::UnsupportedMediaType { .. } => 3,
            Self::NotAcceptable { .. } => 4,
        }
    }
}

#[derive(Debug, Error)]
pub enum MvcError {
    #[error("Required {location} parameter '{name}' is not present")]
    MissingParameter { name: String, location: Source },

    #[error("Failed to convert {location} parameter '{name}' with value '{value}' to {expected}")]
    Binding {
        name: String,
        location: Source,
        value: String,
        expected: &'static str,
    },

    #[error("Request body is not readable: {0}")]
    MessageNotReadable(String),

    #[error("Failed to serialize response body: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Optional int parameter '{name}' is absent but cannot be translated into a null value; declare it as a nullable int")]
    NullPrimitive { name: String },

    /// A handler failed on input it parsed itself
    #[error("Handler failed: {0}")]
    Handler(String),

    #[error("Handler asked for argument '{name}' as {expected}, but no such value is bound")]
    UnboundArgument { name: String, expected: &'static str },

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    RouteMismatch(#[from] Mismatch),

    #[error("Request body too large: {size} bytes (max: {max})")]
    PayloadTooLarge { size: u64, max: u64 },
}

impl MvcError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter { .. } | Self::Binding { .. } | Self::MessageNotReadable(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Serialization(_)
            | Self::NullPrimitive { .. }
            | Self::UnboundArgument { .. }
            | Self::Handler(_)
            | Self::View(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::RouteMismatch(mismatch) => mismatch.status(),
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Client errors are the caller's fault and only logged as warnings
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}
