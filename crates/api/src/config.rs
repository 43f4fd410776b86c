//! API configuration.

use std::env;

use common::{DatabaseConfig, StorageBackend};

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Which repository backs the user service
    pub storage: StorageBackend,
    /// Relational store settings (unused with the memory backend)
    pub database: DatabaseConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            storage: env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|s| {
                    s.parse()
                        .map_err(|e| tracing::warn!("{}, falling back to postgres", e))
                        .ok()
                })
                .unwrap_or_default(),
            database: DatabaseConfig::from_env(),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            storage: StorageBackend::default(),
            database: DatabaseConfig::default(),
        }
    }
}
