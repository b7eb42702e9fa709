//! Process configuration loaded from the environment.
//!
//! Values come from environment variables, with a `.env` file in the
//! working directory loaded first when present. Every setting has a
//! default, so an empty environment yields a runnable configuration.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used.
    #[error("invalid value for {key}: {message}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line events.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'compact' or 'json', found '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Health server bind host (`APP_HOST`).
    pub app_host: String,
    /// Health server port (`APP_PORT`).
    pub app_port: u16,
    /// Default log filter directive (`LOG_LEVEL`); `RUST_LOG` wins when set.
    pub log_level: String,
    /// Log output format (`LOG_FORMAT`).
    pub log_format: LogFormat,
    /// Bus namespace the service consumes from (`BUS_PROJECT_ID`).
    pub bus_project_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_host: "localhost".to_owned(),
            app_port: 3000,
            log_level: "debug".to_owned(),
            log_format: LogFormat::Compact,
            bus_project_id: "skillsync-core".to_owned(),
        }
    }
}

impl AppConfig {
    /// Loads `.env` when present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case outside development.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset or empty variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Ok(Self {
            app_host: read("APP_HOST").unwrap_or(defaults.app_host),
            app_port: parse_or("APP_PORT", read("APP_PORT"), defaults.app_port)?,
            log_level: read("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: parse_or("LOG_FORMAT", read("LOG_FORMAT"), defaults.log_format)?,
            bus_project_id: read("BUS_PROJECT_ID").unwrap_or(defaults.bus_project_id),
        })
    }

    /// Returns the `host:port` address of the health server.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            message: err.to_string(),
        })
    })
}
