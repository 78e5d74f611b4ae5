//! Configuration module for the catalog service and console.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Base URL of the catalog service, used by the remote console adapter
    pub api_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("CATALOG_DB_PATH")
            .unwrap_or_else(|_| "./data/catalog.sqlite".to_string())
            .into();

        let bind_addr = env::var("CATALOG_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()?;

        let log_level = env::var("CATALOG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("CATALOG_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let api_url =
            env::var("CATALOG_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            log_json,
            api_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test touches the environment so parallel tests cannot race on it.
    #[test]
    fn test_config_from_env() {
        env::remove_var("CATALOG_DB_PATH");
        env::remove_var("CATALOG_BIND_ADDR");
        env::remove_var("CATALOG_LOG_LEVEL");
        env::remove_var("CATALOG_LOG_FORMAT");
        env::remove_var("CATALOG_API_URL");

        let config = Config::from_env().unwrap();

        assert_eq!(config.db_path, PathBuf::from("./data/catalog.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert_eq!(config.api_url, "http://127.0.0.1:8080");

        env::set_var("CATALOG_BIND_ADDR", "not-an-address");
        assert!(Config::from_env().is_err());
        env::remove_var("CATALOG_BIND_ADDR");
    }
}
