use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ConfigError;

/// Settings for the catalog client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub poll_interval: Duration,
    /// Try the server-push stream in addition to polling.
    pub push_enabled: bool,
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Reads CATALOG_BASE_URL, CATALOG_POLL_INTERVAL (seconds), CATALOG_PUSH and
    /// CATALOG_SESSION_FILE, falling back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ClientConfig::default();

        let base_url = env::var("CATALOG_BASE_URL").unwrap_or(defaults.base_url);

        let poll_interval = match env::var("CATALOG_POLL_INTERVAL") {
            Ok(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidValue(format!("CATALOG_POLL_INTERVAL: {}", e)))?;
                Duration::from_secs(secs)
            }
            Err(_) => defaults.poll_interval,
        };

        let push_enabled = match env::var("CATALOG_PUSH") {
            Ok(raw) => matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
            Err(_) => defaults.push_enabled,
        };

        let session_file = env::var("CATALOG_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        let config = ClientConfig {
            base_url,
            poll_interval,
            push_enabled,
            session_file,
        };
        config.validate()?;
        debug!("Client config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "base url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ValidationError("poll interval must be greater than 0".to_string()));
        }
        Ok(())
    }
}

fn default_session_file() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("quicktutor").join("session.json"),
        None => {
            warn!("No user config directory, keeping session file in the working directory");
            PathBuf::from(".quicktutor-session.json")
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://127.0.0.1:4000".to_string(),
            poll_interval: Duration::from_secs(30),
            push_enabled: true,
            session_file: default_session_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_interval_is_thirty_seconds() {
        let config = ClientConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ClientConfig {
            base_url: "localhost:4000".to_string(),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
