use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::config::ConfigError;

/// Connection settings shared by the user and course repositories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub user_collection: String,
    pub course_collection: String,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
}

/// Reads `key`, falling back to `default` (with a warning) when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", key, e))),
        Err(_) => {
            warn!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}

impl MongoConfig {
    /// MONGO_URI, MONGO_DATABASE, MONGO_USERNAME, MONGO_PASSWORD,
    /// MONGO_USER_COLLECTION, MONGO_COURSE_COLLECTION, MONGO_POOL_SIZE and
    /// MONGO_CONNECTION_TIMEOUT (seconds). Only the credentials are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = MongoConfig::default();
        let config = MongoConfig {
            uri: env_parse("MONGO_URI", defaults.uri)?,
            database: env_parse("MONGO_DATABASE", defaults.database)?,
            username: env::var("MONGO_USERNAME").ok(),
            password: env::var("MONGO_PASSWORD").ok(),
            user_collection: env_parse("MONGO_USER_COLLECTION", defaults.user_collection)?,
            course_collection: env_parse("MONGO_COURSE_COLLECTION", defaults.course_collection)?,
            pool_size: env_parse("MONGO_POOL_SIZE", defaults.pool_size)?,
            connection_timeout_secs: env_parse("MONGO_CONNECTION_TIMEOUT", defaults.connection_timeout_secs)?,
        };
        config.validate()?;
        debug!(database = %config.database, credentials = config.password.is_some(), "MongoDB config");
        info!("MongoDB configuration loaded");
        Ok(config)
    }

    /// Throwaway database for the `#[ignore]`d repository tests.
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: "quicktutor_test".to_string(),
            user_collection: "test_users".to_string(),
            course_collection: "test_courses".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
            ..MongoConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));
        if self.uri.is_empty() || self.database.is_empty() {
            return fail("MongoDB URI and database cannot be empty");
        }
        if self.user_collection.is_empty() || self.course_collection.is_empty() {
            return fail("MongoDB collection names cannot be empty");
        }
        if self.pool_size == 0 || self.connection_timeout_secs == 0 {
            return fail("MongoDB pool size and timeout must be greater than 0");
        }
        if let (Some(user), Some(pass)) = (&self.username, &self.password) {
            if user.is_empty() || pass.is_empty() {
                return fail("MongoDB credentials cannot be empty if set");
            }
        }
        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://127.0.0.1:27017".to_string(),
            database: "quicktutor".to_string(),
            username: None,
            password: None,
            user_collection: "users".to_string(),
            course_collection: "courses".to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MongoConfig::default();
        assert_eq!(config.uri, "mongodb://127.0.0.1:27017");
        assert_eq!(config.database, "quicktutor");
        assert_eq!(config.course_collection, "courses");
        assert_eq!(config.pool_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = MongoConfig { database: String::new(), ..MongoConfig::default() };
        assert!(config.validate().is_err());

        let config = MongoConfig { pool_size: 0, ..MongoConfig::default() };
        assert!(config.validate().is_err());

        let config = MongoConfig {
            username: Some(String::new()),
            password: Some("secret".to_string()),
            ..MongoConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_test_env_uses_separate_database() {
        let config = MongoConfig::from_test_env();
        assert_eq!(config.database, "quicktutor_test");
        assert!(config.validate().is_ok());
    }
}
