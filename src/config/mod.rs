// Configuration module entry point
// Loads application configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{
    Config, HttpConfig, LogFormat, LoggingConfig, PerformanceConfig, ServerConfig, ViewConfig,
};
use types::{
    DEFAULT_ACCESS_LOG_FORMAT, DEFAULT_HOST, DEFAULT_IO_TIMEOUT, DEFAULT_KEEP_ALIVE_TIMEOUT,
    DEFAULT_LOCALE, DEFAULT_LOG_LEVEL, DEFAULT_MAX_BODY_SIZE, DEFAULT_PORT, DEFAULT_SERVER_NAME,
    DEFAULT_TEMPLATE_DIR, DEFAULT_VIEW_SUFFIX,
};

/// Config file used when neither `--config` nor `MVC_CONFIG` is given
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

impl Config {
    /// Load configuration from a file, then `MVC_*` environment variables
    ///
    /// The file is optional. Nested keys use `__` in variable names, e.g.
    /// `MVC_SERVER__PORT=9090`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("MVC")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?
            .set_default("logging.format", "compact")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", DEFAULT_ACCESS_LOG_FORMAT)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", DEFAULT_KEEP_ALIVE_TIMEOUT)?
            .set_default("performance.read_timeout", DEFAULT_IO_TIMEOUT)?
            .set_default("performance.write_timeout", DEFAULT_IO_TIMEOUT)?
            .set_default("http.server_name", DEFAULT_SERVER_NAME)?
            .set_default("http.max_body_size", DEFAULT_MAX_BODY_SIZE)?
            .set_default("http.default_locale", DEFAULT_LOCALE)?
            .set_default("views.template_dir", DEFAULT_TEMPLATE_DIR)?
            .set_default("views.suffix", DEFAULT_VIEW_SUFFIX)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.format, LogFormat::Compact);
        assert_eq!(cfg.http.max_body_size, 10_485_760);
        assert_eq!(cfg.views.suffix, ".html");
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 9090
workers = 2

[logging]
format = "json"
access_log_format = "$request_method $request_uri $status"

[performance]
max_connections = 64

[views]
template_dir = "/srv/templates"
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.performance.max_connections, Some(64));
        assert_eq!(cfg.views.template_dir, "/srv/templates");
        // untouched keys keep their defaults
        assert_eq!(cfg.http.default_locale, "en-US");
    }

    #[test]
    fn test_default_matches_loaded_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(dir.path().join("none").to_str().unwrap()).unwrap();
        let built = Config::default();
        assert_eq!(loaded.server.host, built.server.host);
        assert_eq!(loaded.http.server_name, built.http.server_name);
        assert_eq!(loaded.logging.access_log_format, built.logging.access_log_format);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::default();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8080);

        let mut bad = Config::default();
        bad.server.host = "not a host".to_string();
        assert!(bad.get_socket_addr().is_err());
    }
}
