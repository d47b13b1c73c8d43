//! Annotation-free request mapping over hyper
//!
//! Routes declare how each handler argument is bound from the request and
//! how the handler's return value becomes the response. The demo controllers
//! in [`controllers`] exercise every binding source and response shape.

pub mod binding;
pub mod config;
pub mod controllers;
pub mod emit;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod model;
pub mod routing;
pub mod server;

pub use error::{Mismatch, MvcError};
