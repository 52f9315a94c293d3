//! Configuration types
//!
//! [`InitOptions`] carries what `Log::initialize` needs; [`LogConfig`] bundles
//! it with the formatting and console settings so a whole setup can be loaded
//! from JSON.

use super::detail_level::DetailLevel;
use super::error::{LoggerError, Result};
use super::formatter::TagStyle;
use super::timestamp::{validate_strftime, TimestampFormat};
use crate::appenders::{ConsoleSettings, LATEST_FILE_NAME};
use crate::retention::{AgeComparison, RetentionPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// strftime pattern of the per-run log file name (local time)
pub const DEFAULT_FILE_NAME_FORMAT: &str = "%Y-%m-%d_%H:%M:%S.txt";

/// Arguments of `Log::initialize`
///
/// # Examples
///
/// ```
/// use osiris_log::InitOptions;
/// use std::time::Duration;
///
/// let options = InitOptions::new()
///     .with_log_folder("logs")
///     .with_max_log_files(10)
///     .with_max_log_age(Duration::from_secs(7 * 24 * 3600));
/// assert!(options.file_logging_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitOptions {
    /// Folder for log files; `None` or empty disables file logging
    pub log_folder: Option<PathBuf>,
    pub retention: RetentionPolicy,
    pub file_name_format: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            log_folder: None,
            retention: RetentionPolicy::default(),
            file_name_format: DEFAULT_FILE_NAME_FORMAT.to_string(),
        }
    }
}

impl InitOptions {
    /// Console-only options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_log_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.log_folder = Some(folder.into());
        self
    }

    /// Keep only the newest `max_files` files; zero or negative means unlimited
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_log_files(mut self, max_files: i64) -> Self {
        self.retention.max_files = usize::try_from(max_files).unwrap_or(0);
        self
    }

    /// Maximum age for the age stage; `Duration::ZERO` means unlimited
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_log_age(mut self, max_age: Duration) -> Self {
        self.retention.max_age = max_age;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.retention.interval = interval;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_age_comparison(mut self, comparison: AgeComparison) -> Self {
        self.retention.age_comparison = comparison;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file_name_format(mut self, format: impl Into<String>) -> Self {
        self.file_name_format = format.into();
        self
    }

    /// The log folder, if file logging is enabled
    pub fn folder(&self) -> Option<&Path> {
        self.log_folder
            .as_deref()
            .filter(|folder| !folder.as_os_str().is_empty())
    }

    pub fn file_logging_enabled(&self) -> bool {
        self.folder().is_some()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.file_logging_enabled() {
            return Ok(());
        }
        if self.file_name_format.is_empty() {
            return Err(LoggerError::config("InitOptions", "file name format is empty"));
        }
        validate_strftime(&self.file_name_format)?;
        if self.file_name_format == LATEST_FILE_NAME {
            return Err(LoggerError::config(
                "InitOptions",
                format!("file name format collides with '{}'", LATEST_FILE_NAME),
            ));
        }
        if self.retention.interval.is_zero() {
            return Err(LoggerError::config("RetentionPolicy", "cleanup interval is zero"));
        }
        Ok(())
    }
}

/// Complete logging setup, loadable from JSON
///
/// # Examples
///
/// ```
/// use osiris_log::{DetailLevel, LogConfig};
///
/// let config = LogConfig::from_json_str(r#"{
///     "detail_level": "Basic",
///     "console": { "colors": false },
///     "init": { "log_folder": "logs", "retention": { "max_files": 10 } }
/// }"#).unwrap();
///
/// assert_eq!(config.detail_level, DetailLevel::Basic);
/// assert_eq!(config.init.retention.max_files, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub detail_level: DetailLevel,
    pub timestamp_format: TimestampFormat,
    pub tag_style: TagStyle,
    pub console: ConsoleSettings,
    pub init: InitOptions,
}

impl LogConfig {
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or a custom timestamp format is invalid
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LogConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns error if the file cannot be read or does not hold a valid config
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "read log config",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(format_str) = &self.timestamp_format {
            validate_strftime(format_str)?;
        }
        self.init.validate()
    }
}
