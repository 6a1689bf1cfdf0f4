//! Core error types for cupmate-core.
//!
//! Invalid intake amounts are not errors (see [`crate::intake::Applied`]) and
//! an empty reminder schedule is a valid outcome
//! (see [`crate::reminder::ReminderPlan`]). Everything here is a rejected
//! configuration or a failure at the file boundary.

use std::path::PathBuf;

use chrono::NaiveTime;
use thiserror::Error;

/// Core error type for cupmate-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Reminder interval outside the pickable values, or zero
    #[error("Invalid interval: {hours}h {minutes}min (hours 0-3, minutes 0/15/30/45, not both zero)")]
    InvalidInterval { hours: u8, minutes: u8 },

    /// Work period whose start is not before its end
    #[error("Invalid time range: end ({end}) must be later than start ({start})")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    /// Weekday ordinal outside 1..=7
    #[error("Invalid weekday {0}: expected 1 (Monday) to 7 (Sunday)")]
    InvalidWeekday(u8),

    /// No work period with this id
    #[error("Unknown work period: {0}")]
    UnknownWorkPeriod(String),

    /// Two work periods share an id
    #[error("Duplicate work period id: {0}")]
    DuplicateWorkPeriod(String),

    /// Daily goal must be positive and finite
    #[error("Invalid daily goal {0}: must be a positive number of ml")]
    InvalidGoal(f64),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Wrap this error as the reason a reminder configuration cannot be enabled.
    pub fn cannot_enable(self) -> ConfigError {
        ConfigError::InvalidValue {
            key: "reminders".to_string(),
            message: format!("cannot enable: invalid configuration ({self})"),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_error_mentions_values() {
        let err = ValidationError::InvalidInterval { hours: 0, minutes: 0 };
        assert!(err.to_string().contains("0h 0min"));
    }

    #[test]
    fn cannot_enable_wraps_validation_message() {
        let err = ValidationError::InvalidWeekday(9).cannot_enable();
        let msg = err.to_string();
        assert!(msg.contains("cannot enable: invalid configuration"));
        assert!(msg.contains("Invalid weekday 9"));
    }

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::InvalidGoal(-1.0).into();
        assert!(matches!(err, CoreError::Validation(ValidationError::InvalidGoal(_))));
    }
}
