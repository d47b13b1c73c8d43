//! Request handler module
//!
//! Hyper entry point, the dispatcher that runs a matched route, and the
//! signature every controller handler implements.

pub mod dispatcher;
pub mod invocation;
pub mod router;

pub use dispatcher::{error_response, Dispatched, Dispatcher};
pub use invocation::{HandlerFn, Invocation};
pub use router::handle_request;
