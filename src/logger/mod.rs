//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Subscriber setup (compact or JSON lines, `EnvFilter` levels)
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use hyper::header::HeaderMap;
use hyper::{Method, Uri, Version};
use tracing::{debug, error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};
use crate::routing::RouteTable;

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`. Should be called once at
/// application startup.
pub fn init(config: &Config) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .json(),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .compact(),
            )
            .try_init(),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    info!("======================================");
    info!("Server started successfully");
    info!("Listening on: http://{addr}");
    info!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        info!("Worker threads: {workers}");
    }
    info!("Max body size: {} bytes", config.http.max_body_size);
    if let Some(max) = config.performance.max_connections {
        info!("Max connections: {max}");
    }
    info!(
        "Views: {}/*{}",
        config.views.template_dir, config.views.suffix
    );
    info!("======================================");
}

/// One line per registered mapping
pub fn log_routes(table: &RouteTable) {
    for route in table.routes() {
        let methods = if route.condition.methods.is_empty() {
            "*".to_string()
        } else {
            route
                .condition
                .methods
                .iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join("|")
        };
        info!("Mapped {methods} {} -> {}", route.template, route.name);
    }
    info!("{} routes registered", table.len());
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    error!("Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    info!("[Request] {method} {uri} {version:?}");
}

pub fn log_headers(headers: &HeaderMap, show: bool) {
    if !show {
        return;
    }
    info!("[Headers] Count: {}", headers.len());
    for (name, value) in headers {
        info!("  {name}: {}", value.to_str().unwrap_or("<binary>"));
    }
}

pub fn log_error(message: &str) {
    error!("{message}");
}

pub fn log_warning(message: &str) {
    warn!("{message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    info!(target: "access", "{}", entry.format(format));
}

pub fn log_shutdown(active_connections: usize) {
    info!("Shutdown requested, {active_connections} connection(s) still active");
}
