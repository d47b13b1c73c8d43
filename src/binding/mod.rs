//! Request binding module
//!
//! Per-route argument descriptors, the binder that executes them, and the
//! typed argument bag handed to handlers.

pub mod args;
pub mod binder;
pub mod convert;
pub mod descriptor;
pub mod record;

pub use args::{Arguments, RequestEntity, Value};
pub use binder::Binder;
pub use descriptor::{Descriptor, Kind, ParamSpec, Source};
pub use record::{Field, FieldKind, Record, RecordShape};
