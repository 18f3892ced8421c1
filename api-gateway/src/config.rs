//! Application configuration

use std::env;

/// Default listening port
pub const DEFAULT_PORT: u16 = 3333;

/// Default listening host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API host
    pub host: String,
    /// API port
    pub port: u16,
    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            json_logs: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Listening address in `host:port` form
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
