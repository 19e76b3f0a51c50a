//! Runtime configuration for task ordering services.
//!
//! Values come from environment variables and fall back to defaults when a
//! variable is unset:
//!
//! | Variable                              | Default |
//! |---------------------------------------|---------|
//! | `TASKBOARD_RANK_GAP`                  | `1000`  |
//! | `TASKBOARD_BULK_UPDATE_MAX_ATTEMPTS`  | `3`     |
//! | `TASKBOARD_MAX_BATCH_SIZE`            | `500`   |
//!
//! # Examples
//!
//! ```
//! use taskboard::config::TaskBoardConfig;
//!
//! let config = TaskBoardConfig::from_lookup(|key| match key {
//!     "TASKBOARD_RANK_GAP" => Some("64".to_owned()),
//!     _ => None,
//! })?;
//! assert_eq!(config.rank_gap.value(), 64);
//! assert_eq!(config.bulk_update_max_attempts, 3);
//! # Ok::<(), taskboard::config::ConfigurationError>(())
//! ```

use crate::task::domain::{RankGap, TaskDomainError};
use std::env;
use thiserror::Error;

/// Environment variable holding the rank gap.
pub const RANK_GAP_VAR: &str = "TASKBOARD_RANK_GAP";
/// Environment variable holding the per-task write attempts of a bulk update.
pub const BULK_UPDATE_MAX_ATTEMPTS_VAR: &str = "TASKBOARD_BULK_UPDATE_MAX_ATTEMPTS";
/// Environment variable holding the largest accepted reorder batch.
pub const MAX_BATCH_SIZE_VAR: &str = "TASKBOARD_MAX_BATCH_SIZE";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A variable is set but is not an integer.
    #[error("{variable} must be an integer, got '{value}'")]
    NotAnInteger {
        /// Offending variable.
        variable: &'static str,
        /// Raw value.
        value: String,
    },

    /// The rank gap is out of range.
    #[error(transparent)]
    RankGap(#[from] TaskDomainError),

    /// A count that must be positive was zero.
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Settings shared by the task services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskBoardConfig {
    /// Gap between allocated and rebalanced ranks.
    pub rank_gap: RankGap,
    /// Attempts per task write during a bulk update, including the first.
    pub bulk_update_max_attempts: u32,
    /// Largest reorder batch accepted in one call.
    pub max_batch_size: usize,
}

impl Default for TaskBoardConfig {
    fn default() -> Self {
        Self {
            rank_gap: RankGap::DEFAULT,
            bulk_update_max_attempts: 3,
            max_batch_size: 500,
        }
    }
}

impl TaskBoardConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable is malformed or out of
    /// range.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a value is malformed or out of
    /// range.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigurationError> {
        let defaults = Self::default();
        let read = |variable: &'static str| {
            lookup(variable)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let rank_gap = match read(RANK_GAP_VAR) {
            Some(value) => RankGap::new(parse_integer(RANK_GAP_VAR, &value)?)?,
            None => defaults.rank_gap,
        };
        let bulk_update_max_attempts = match read(BULK_UPDATE_MAX_ATTEMPTS_VAR) {
            Some(value) => parse_integer(BULK_UPDATE_MAX_ATTEMPTS_VAR, &value)?,
            None => defaults.bulk_update_max_attempts,
        };
        let max_batch_size = match read(MAX_BATCH_SIZE_VAR) {
            Some(value) => parse_integer(MAX_BATCH_SIZE_VAR, &value)?,
            None => defaults.max_batch_size,
        };

        let config = Self {
            rank_gap,
            bulk_update_max_attempts,
            max_batch_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Zero`] when the attempt count or the
    /// batch size is zero.
    pub const fn validate(&self) -> Result<(), ConfigurationError> {
        if self.bulk_update_max_attempts == 0 {
            return Err(ConfigurationError::Zero(BULK_UPDATE_MAX_ATTEMPTS_VAR));
        }
        if self.max_batch_size == 0 {
            return Err(ConfigurationError::Zero(MAX_BATCH_SIZE_VAR));
        }
        Ok(())
    }
}

fn parse_integer<T: std::str::FromStr>(
    variable: &'static str,
    value: &str,
) -> Result<T, ConfigurationError> {
    value
        .parse()
        .map_err(|_| ConfigurationError::NotAnInteger {
            variable,
            value: value.to_owned(),
        })
}
