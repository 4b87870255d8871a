//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges.

use super::Config;
use crate::error::ConfigError;

/// Largest history capacity accepted.
pub const MAX_RECORDS_LIMIT: usize = 1000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `DATABASE_PATH` must not be empty
/// - `MAX_RECORDS` must be between 1 and 1000
/// - `HISTORY_KEY` must not be empty
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.database_path.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "DATABASE_PATH".into(),
            reason: "must not be empty".into(),
        });
    }

    if config.max_records == 0 || config.max_records > MAX_RECORDS_LIMIT {
        return Err(ConfigError::InvalidValue {
            var: "MAX_RECORDS".into(),
            reason: format!("must be between 1 and {MAX_RECORDS_LIMIT}"),
        });
    }

    if config.history_key.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "HISTORY_KEY".into(),
            reason: "must not be empty".into(),
        });
    }

    Ok(())
}
