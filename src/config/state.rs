// Application state module
// Everything a connection task needs, shared read-only after startup

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::types::Config;
use crate::binding::Binder;
use crate::controllers;
use crate::emit::{Emitter, TemplateViews, ViewRenderer};
use crate::handler::Dispatcher;
use crate::routing::RouteTable;

/// Application state
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
    /// Cached so the hot path reads it without touching the config
    pub cached_access_log: AtomicBool,
    pub active_connections: AtomicUsize,
}

impl AppState {
    /// Wire the demo controllers with template views from the config
    pub fn new(config: Config) -> Self {
        let views = TemplateViews::new(&config.views.template_dir, &config.views.suffix);
        Self::with_views(config, Arc::new(views))
    }

    pub fn with_views(config: Config, views: Arc<dyn ViewRenderer>) -> Self {
        let dispatcher = Dispatcher::new(
            RouteTable::new(controllers::routes()),
            Binder::new(config.http.default_locale.as_str()),
            Emitter::new(views, &config.http.server_name),
        );
        Self {
            cached_access_log: AtomicBool::new(config.logging.access_log),
            active_connections: AtomicUsize::new(0),
            dispatcher,
            config,
        }
    }

    pub fn access_log_enabled(&self) -> bool {
        self.cached_access_log.load(Ordering::Relaxed)
    }
}
