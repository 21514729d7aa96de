// Configuration module entry point
// Layered loading: optional config.toml, SERVER_* env vars, explicit PORT override

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig};

impl Config {
    /// Load configuration from the default "config.toml" location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension)
    ///
    /// `PORT` is applied last so the deployment environment always wins.
    /// A non-numeric value fails deserialization and aborts startup.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("site.static_dir", "static")?
            .set_default("site.template", "templates/index.html")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?;

        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        let settings = builder.build()?;
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

    // PORT is process-wide state, so the default / override / invalid cases
    // run sequentially in one test.
    #[test]
    fn test_port_resolution() {
        std::env::remove_var("PORT");
        let cfg = Config::load().expect("default config should load");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.site.static_dir, "static");
        assert_eq!(cfg.site.template, "templates/index.html");

        let addr = cfg.socket_addr().expect("address should parse");
        assert_eq!(addr.port(), 5000);
        assert!(addr.ip().is_unspecified());

        std::env::set_var("PORT", "8080");
        let cfg = Config::load().expect("overridden config should load");
        assert_eq!(cfg.server.port, 8080);

        std::env::set_var("PORT", "not-a-port");
        assert!(Config::load().is_err());

        std::env::remove_var("PORT");
    }

    #[test]
    fn test_invalid_host_rejected() {
        let cfg = Config {
            server: ServerConfig {
                host: "not an address".to_string(),
                port: 5000,
                workers: None,
            },
            site: SiteConfig {
                static_dir: "static".to_string(),
                template: "templates/index.html".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
        };
        assert!(cfg.socket_addr().is_err());
    }
}
