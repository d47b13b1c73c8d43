//! Request dispatcher
//!
//! Route selection, argument binding, handler invocation and response
//! emission, run synchronously one after another. Any failure short-circuits
//! into a JSON error response; the handler never runs when binding fails.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tracing::debug;

use super::invocation::Invocation;
use crate::binding::Binder;
use crate::emit::{EmitContext, Emitter};
use crate::error::{Mismatch, MvcError};
use crate::http::{build_error_response, RequestParts};
use crate::logger;
use crate::routing::RouteTable;

/// Response plus the name of the route that produced it
pub struct Dispatched {
    pub response: Response<Full<Bytes>>,
    pub route: Option<String>,
}

pub struct Dispatcher {
    table: RouteTable,
    binder: Binder,
    emitter: Emitter,
}

impl Dispatcher {
    pub fn new(table: RouteTable, binder: Binder, emitter: Emitter) -> Self {
        Self {
            table,
            binder,
            emitter,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// Serve one collected request
    pub fn dispatch(&self, req: &RequestParts) -> Dispatched {
        let mut route = None;
        let response = self
            .try_dispatch(req, &mut route)
            .unwrap_or_else(|e| error_response(&e, &req.path));
        Dispatched { response, route }
    }

    fn try_dispatch(
        &self,
        req: &RequestParts,
        route_name: &mut Option<String>,
    ) -> Result<Response<Full<Bytes>>, MvcError> {
        let matched = self.table.lookup(req)?;
        let route = matched.route;
        *route_name = Some(route.name.clone());
        debug!(route = %route.name, template = %route.template, "Route matched");

        let args = self.binder.bind(&route.descriptor, req, &matched.path_vars)?;

        let mut invocation = Invocation::new(args, req);
        let reply = (route.handler)(&mut invocation)?;

        let writer = route.descriptor.writes_raw().then_some(invocation.writer);
        let produces = matched.produces.map(|mt| mt.to_string());
        self.emitter.emit(
            reply,
            EmitContext {
                mode: route.mode,
                produces: produces.as_deref(),
                path: &req.path,
            },
            writer,
        )
    }
}

/// Log the failure once and render it as a JSON error body
pub fn error_response(err: &MvcError, path: &str) -> Response<Full<Bytes>> {
    if err.is_client_error() {
        logger::log_warning(&format!("{path}: {err}"));
    } else {
        logger::log_error(&format!("{path}: {err}"));
    }

    let allow = match err {
        MvcError::RouteMismatch(Mismatch::MethodNotAllowed { allowed }) => Some(allowed.as_slice()),
        _ => None,
    };
    build_error_response(err.status(), err.to_string(), path, allow)
}
