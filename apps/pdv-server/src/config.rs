//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable | Default |
//! |---|---|
//! | `PDV_BIND_ADDR` | `0.0.0.0` |
//! | `PDV_PORT` | `8000` |
//! | `PDV_DATABASE_PATH` | `./pdv.db` |
//! | `PDV_STATIC_DIR` | `static` |
//! | `PDV_DB_MAX_CONNECTIONS` | `5` |

use pdv_db::DbConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub bind_addr: String,

    /// TCP port
    pub port: u16,

    /// SQLite database file, created on first start
    pub database_path: PathBuf,

    /// Directory served under `/static`; `index.html` here backs `GET /`
    pub static_dir: PathBuf,

    /// Upper bound of the SQLite connection pool
    pub db_max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 8000,
            database_path: PathBuf::from("./pdv.db"),
            static_dir: PathBuf::from("static"),
            db_max_connections: 5,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();

        let config = ServerConfig {
            bind_addr: get("PDV_BIND_ADDR").unwrap_or(defaults.bind_addr),

            port: match get("PDV_PORT") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PDV_PORT".to_string()))?,
                None => defaults.port,
            },

            database_path: get("PDV_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            static_dir: get("PDV_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),

            db_max_connections: match get("PDV_DB_MAX_CONNECTIONS") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PDV_DB_MAX_CONNECTIONS".to_string()))?,
                None => defaults.db_max_connections,
            },
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "PDV_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Builds the pool configuration for this server.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
