//! Runtime configuration
//!
//! Values come from command-line flags or environment variables. A `.env`
//! file in the working directory is loaded first, so anything it defines
//! behaves like a regular environment variable.

use crate::error::{AppError, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Store location that keeps everything in memory
pub const IN_MEMORY_STORE: &str = ":memory:";

/// Server configuration
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about = "Remote work dashboard API server")]
pub struct AppConfig {
    /// Address to bind the HTTP server to
    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP server port
    #[clap(long, env = "PORT", default_value_t = 8001)]
    pub port: u16,

    /// Document store location: a directory, or `:memory:`
    #[clap(long, env = "STORE_URL", default_value = "./data")]
    pub store_url: String,

    /// Database name inside the store location
    #[clap(long, env = "DB_NAME", default_value = "thrive_remote")]
    pub db_name: String,

    /// Interval between simulated download progress steps, in milliseconds
    #[clap(long, env = "DOWNLOAD_TICK_MS", default_value_t = 1000)]
    pub download_tick_ms: u64,
}

impl AppConfig {
    /// Load `.env` (if present) and parse flags and environment
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::info!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Failed to load .env file: {}", e),
        }
        Self::parse()
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid address: {}", e)))
    }

    /// Path of the SQLite file backing the document store, `None` for in-memory
    pub fn store_path(&self) -> Result<Option<PathBuf>> {
        if self.store_url == IN_MEMORY_STORE {
            return Ok(None);
        }
        if self.db_name.trim().is_empty() {
            return Err(AppError::Config("DB_NAME must not be empty".to_string()));
        }
        Ok(Some(
            PathBuf::from(&self.store_url).join(format!("{}.db", self.db_name)),
        ))
    }

    pub fn download_tick(&self) -> Duration {
        Duration::from_millis(self.download_tick_ms.max(1))
    }

    /// Defaults with an in-memory store, for tests and throwaway runs
    pub fn in_memory() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            store_url: IN_MEMORY_STORE.to_string(),
            db_name: "thrive_remote".to_string(),
            download_tick_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = AppConfig::parse_from([
            "thrive-remote-api",
            "--port",
            "9000",
            "--store-url",
            "/tmp/store",
            "--db-name",
            "dash",
            "--download-tick-ms",
            "50",
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.store_path().unwrap(),
            Some(PathBuf::from("/tmp/store/dash.db"))
        );
        assert_eq!(config.download_tick(), Duration::from_millis(50));
    }

    #[test]
    fn test_in_memory_store() {
        let config = AppConfig::in_memory();
        assert_eq!(config.store_path().unwrap(), None);
    }

    #[test]
    fn test_flag_defaults_use_disk_store() {
        let config = AppConfig::parse_from(["thrive-remote-api"]);
        assert_eq!(config.store_url, "./data");
        assert_eq!(
            config.store_path().unwrap(),
            Some(PathBuf::from("./data/thrive_remote.db"))
        );
        assert_eq!(AppConfig::in_memory().store_path().unwrap(), None);
    }

    #[test]
    fn test_bind_addr() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..AppConfig::in_memory()
        };
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");

        let bad = AppConfig {
            host: "not an address".to_string(),
            ..AppConfig::in_memory()
        };
        assert!(matches!(bad.bind_addr(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_empty_db_name_rejected() {
        let config = AppConfig {
            store_url: "./data".to_string(),
            db_name: " ".to_string(),
            ..AppConfig::in_memory()
        };
        assert!(config.store_path().is_err());
    }
}
