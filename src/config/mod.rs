//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Configuration validation
//! - Default value handling
//!
//! # Example
//!
//! ```
//! use troubleshoot_wizard::config::Config;
//! use troubleshoot_wizard::graph::DeadEndPolicy;
//!
//! // Use Config::from_env() in production
//! let config = Config::default();
//! assert_eq!(config.max_records, 50);
//! assert_eq!(config.dead_end_policy(), DeadEndPolicy::Warn);
//! ```

mod validation;

pub use validation::{validate_config, MAX_RECORDS_LIMIT};

use tracing_subscriber::filter::EnvFilter;

use crate::error::ConfigError;
use crate::graph::DeadEndPolicy;
use crate::history::MAX_RECORDS;
use crate::storage::DEFAULT_HISTORY_KEY;

/// Default database path.
pub const DEFAULT_DATABASE_PATH: &str = "./data/diagnoses.db";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Database path.
    pub database_path: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// How many diagnoses the history keeps.
    pub max_records: usize,
    /// Storage key of the history.
    pub history_key: String,
    /// Extra directory of wizard JSON files.
    pub wizard_dir: Option<String>,
    /// Refuse wizards that contain dead-end stops.
    pub strict_graphs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_records: MAX_RECORDS,
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            wizard_dir: None,
            strict_graphs: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `DATABASE_PATH`: Path to `SQLite` database (default: `./data/diagnoses.db`)
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `MAX_RECORDS`: History capacity (default: `50`)
    /// - `HISTORY_KEY`: Storage key (default: `byc-diagnosis-history`)
    /// - `WIZARD_DIR`: Directory of extra wizard files (default: none)
    /// - `STRICT_GRAPHS`: Refuse dead-end stops (default: `false`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `MAX_RECORDS` is not a valid positive integer
    /// - `STRICT_GRAPHS` is not a boolean
    /// - Any value fails validation (see [`validate_config`])
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into());
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());
        let max_records = parse_env_usize("MAX_RECORDS", MAX_RECORDS)?;
        let history_key =
            std::env::var("HISTORY_KEY").unwrap_or_else(|_| DEFAULT_HISTORY_KEY.into());
        let wizard_dir = std::env::var("WIZARD_DIR").ok().filter(|d| !d.is_empty());
        let strict_graphs = parse_env_bool("STRICT_GRAPHS", false)?;

        let config = Self {
            database_path,
            log_level,
            max_records,
            history_key,
            wizard_dir,
            strict_graphs,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Log filter built from `log_level`, `info` if it does not parse.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }

    /// Validation policy for dead-end stops.
    #[must_use]
    pub const fn dead_end_policy(&self) -> DeadEndPolicy {
        if self.strict_graphs {
            DeadEndPolicy::Reject
        } else {
            DeadEndPolicy::Warn
        }
    }
}

/// Parse an environment variable as usize, using a default if not set.
fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}

/// Parse an environment variable as a boolean, using a default if not set.
fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        match val.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                var: name.into(),
                reason: "must be true or false".into(),
            }),
        }
    })
}
