//! Log level definitions

use super::error::LoggerError;
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// `None` is a sentinel that sorts above every real severity. Records logged
/// at `None` are still emitted; the level only labels them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Information = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
    None = 6,
}

impl LogLevel {
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Information,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::None,
    ];

    /// Four-letter code used in the `[CODE]` field of formatted output
    pub fn short_code(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRAC",
            LogLevel::Debug => "DBUG",
            LogLevel::Information => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERRR",
            LogLevel::Critical => "CRIT",
            LogLevel::None => "NONE",
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "Trace",
            LogLevel::Debug => "Debug",
            LogLevel::Information => "Information",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Critical => "Critical",
            LogLevel::None => "None",
        }
    }

    /// Console colors used when the caller does not override them.
    ///
    /// Critical uses an inverted scheme so it stands out from Error.
    pub fn colors(&self) -> ConsoleColors {
        use colored::Color::*;
        match self {
            LogLevel::Trace => ConsoleColors::new(Black, BrightBlue),
            LogLevel::Debug => ConsoleColors::new(Black, BrightCyan),
            LogLevel::Information => ConsoleColors::new(Black, BrightGreen),
            LogLevel::Warning => ConsoleColors::new(Black, BrightYellow),
            LogLevel::Error => ConsoleColors::new(Black, BrightRed),
            LogLevel::Critical => ConsoleColors::new(Red, BrightWhite),
            LogLevel::None => ConsoleColors::new(Black, White),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" | "TRAC" => Ok(LogLevel::Trace),
            "DEBUG" | "DBUG" => Ok(LogLevel::Debug),
            "INFO" | "INFORMATION" => Ok(LogLevel::Information),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" | "ERRR" => Ok(LogLevel::Error),
            "CRITICAL" | "CRIT" => Ok(LogLevel::Critical),
            "NONE" => Ok(LogLevel::None),
            _ => Err(LoggerError::parse("log level", s)),
        }
    }
}

/// Background/foreground pair applied to one console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleColors {
    pub background: Color,
    pub foreground: Color,
}

impl ConsoleColors {
    pub const fn new(background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
        }
    }
}
