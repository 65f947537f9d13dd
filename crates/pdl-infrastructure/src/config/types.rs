//! Configuration types
//!
//! Structs describing the database target and logging behavior, with
//! validation rules enforced after every load.

use crate::constants::{
    DEFAULT_APPLICATION_NAME, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_DB_HOST, DEFAULT_DB_NAME,
    DEFAULT_DB_PORT, DEFAULT_DB_USER, DEFAULT_LOG_LEVEL,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Helper module for Duration serialization/deserialization
/// Converts between Duration and integer seconds in TOML
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serialize Duration as integer seconds
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    /// Deserialize Duration from integer seconds
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Database connection target
    #[validate(nested)]
    pub database: DatabaseConfig,
    /// Logging behavior
    #[validate(nested)]
    pub logging: LoggingConfig,
}

/// Database connection configuration
///
/// Either a full connection string in `url`, or the discrete
/// host/port/user/password/dbname fields. A non-empty `url` takes
/// precedence.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string; overrides the discrete fields when set
    #[serde(default)]
    pub url: String,
    /// Database host
    pub host: String,
    /// Database port
    #[validate(range(min = 1))]
    pub port: u16,
    /// Database user
    pub user: String,
    /// Database password
    #[serde(default)]
    pub password: String,
    /// Database name
    pub dbname: String,
    /// Connection timeout (in seconds)
    #[serde(default, with = "duration_secs")]
    pub connect_timeout: Duration,
    /// Application name reported to the server
    #[serde(default)]
    pub application_name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            user: DEFAULT_DB_USER.to_string(),
            password: String::new(),
            dbname: DEFAULT_DB_NAME.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Build a configuration that connects through a connection string
    pub fn from_url<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Human-readable description of the connection target for log output
    ///
    /// Never includes credentials.
    pub fn endpoint(&self) -> String {
        if self.url.is_empty() {
            format!("{}:{}/{}", self.host, self.port, self.dbname)
        } else {
            "<connection string>".to_string()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1))]
    pub level: String,
    /// Emit JSON-formatted log lines instead of human-readable output
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}
