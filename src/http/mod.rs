//! HTTP protocol layer module
//!
//! Request snapshots, media types and response builders, independent of the
//! binding and routing machinery that sits on top of them.

pub mod media;
pub mod request;
pub mod response;

pub use media::MediaType;
pub use request::{collect, RequestParts};
pub use response::{build_413_response, build_body_response, build_error_response, build_raw_response};
