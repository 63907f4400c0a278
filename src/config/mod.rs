// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, QrConfig, ServerConfig,
};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("QR"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("qr.image_path", "bot.qr.png")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let cfg = Config::load_from("/nonexistent/qr-viewer-config").expect("defaults load");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.qr.image_path, "bot.qr.png");
        assert!(cfg.logging.access_log);
        assert!(cfg.health.enabled);
        assert_eq!(cfg.health.liveness_path, "/healthz");
        assert_eq!(cfg.health.readiness_path, "/readyz");
    }

    #[test]
    fn test_socket_addr_parsing() {
        let mut cfg = Config::load_from("/nonexistent/qr-viewer-config").expect("defaults load");
        let addr = cfg.socket_addr().expect("valid address");
        assert_eq!(addr.port(), 8000);

        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }
}
