//! Runtime configuration for gradebook callers.
//!
//! # Responsibility
//! - Resolve the record directory and logging settings from the environment.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - `log_level` is always one of the normalized level names.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Directory used when nothing else is configured.
pub const DEFAULT_RECORDS_DIR: &str = "gpa_records";

pub const ENV_RECORDS_DIR: &str = "GRADEBOOK_RECORDS_DIR";
pub const ENV_LOG_LEVEL: &str = "GRADEBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GRADEBOOK_LOG_DIR";

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// `GRADEBOOK_LOG_LEVEL` holds an unsupported level.
    LogLevel(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LogLevel(err) => write!(f, "{ENV_LOG_LEVEL}: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::LogLevel(err) => Some(err),
        }
    }
}

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradebookConfig {
    /// Directory holding one `<reg_no>.json` per record.
    pub records_dir: PathBuf,
    pub log_level: &'static str,
    /// File logging is off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            records_dir: PathBuf::from(DEFAULT_RECORDS_DIR),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl GradebookConfig {
    /// Reads `GRADEBOOK_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut config = Self::default();
        if let Some(dir) = value(ENV_RECORDS_DIR) {
            config.records_dir = PathBuf::from(dir);
        }
        if let Some(level) = value(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(ConfigError::LogLevel)?;
        }
        config.log_dir = value(ENV_LOG_DIR).map(PathBuf::from);
        Ok(config)
    }
}
