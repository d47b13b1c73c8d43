//! Response emission module
//!
//! Handler replies, the raw response writer, view rendering and the emitter
//! that turns a reply into the final HTTP response.

pub mod emitter;
pub mod reply;
pub mod view;
pub mod writer;

pub use emitter::{EmitContext, Emitter};
pub use reply::{ModelAndView, Reply, ResponseEntity, ResponseMode};
pub use view::{TemplateViews, ViewError, ViewRenderer};
pub use writer::ResponseWriter;
