//! Timestamp formatting utilities
//!
//! Timestamps are rendered in local time. Custom formats use chrono's
//! strftime syntax and are validated before they are accepted.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Format of the `(timestamp)` field
///
/// # Examples
///
/// ```
/// use osiris_log::TimestampFormat;
/// use chrono::Local;
///
/// let format = TimestampFormat::Standard;
/// let rendered = format.format(&Local::now());
/// assert_eq!(rendered.len(), "2025-01-08 10:30:45.123".len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45.123`
    #[default]
    Standard,

    /// ISO 8601 with milliseconds and offset: `2025-01-08T10:30:45.123+01:00`
    Iso8601,

    /// RFC 3339: `2025-01-08T10:30:45.123456789+01:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// Build it with [`TimestampFormat::custom`] to have the format checked.
    Custom(String),
}

impl TimestampFormat {
    /// Validated custom format
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `format_str` contains a specifier
    /// chrono does not understand.
    pub fn custom(format_str: &str) -> Result<Self> {
        validate_strftime(format_str)?;
        Ok(TimestampFormat::Custom(format_str.to_string()))
    }

    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self {
            TimestampFormat::Standard => datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                // A Custom built without `custom()` may hold a bad specifier;
                // render it verbatim rather than panicking mid-log.
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => format_str.clone(),
                }
            }
        }
    }
}

/// Reject strftime strings chrono cannot render
pub(crate) fn validate_strftime(format_str: &str) -> Result<()> {
    if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
        return Err(LoggerError::config(
            "TimestampFormat",
            format!("invalid strftime format '{}'", format_str),
        ));
    }
    Ok(())
}
