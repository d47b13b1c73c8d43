//! Handler signature and per-call context

use crate::binding::Arguments;
use crate::emit::{Reply, ResponseWriter};
use crate::error::MvcError;
use crate::http::RequestParts;

/// Everything a handler receives for one request
pub struct Invocation<'a> {
    /// Arguments bound from the route's descriptor
    pub args: Arguments,
    /// Raw request, for handlers that declared a request handle
    pub request: &'a RequestParts,
    /// Raw writer; its output is sent only when the route declared a writer
    pub writer: ResponseWriter,
}

impl<'a> Invocation<'a> {
    pub fn new(args: Arguments, request: &'a RequestParts) -> Self {
        Self {
            args,
            request,
            writer: ResponseWriter::default(),
        }
    }
}

pub type HandlerFn = fn(&mut Invocation<'_>) -> Result<Reply, MvcError>;
