use std::env;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::config::ConfigError;

/// Which backing store the repositories use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreKind::Mongo),
            "memory" | "mem" => Ok(StoreKind::Memory),
            other => Err(ConfigError::InvalidValue(format!("APP_STORE: unknown store '{}'", other))),
        }
    }
}

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4000);
        let store = match env::var("APP_STORE") {
            Ok(value) => value.parse()?,
            Err(_) => {
                warn!("APP_STORE not set, using default: mongo");
                StoreKind::Mongo
            }
        };
        debug!("App config: host={}, port={}, store={:?}", host, port, store);
        Ok(AppConfig { host, port, store })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 4000,
            store: StoreKind::Mongo,
        }
    }
}
