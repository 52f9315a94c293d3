//! Log record and call-site metadata

use super::log_level::{ConsoleColors, LogLevel};
use chrono::{DateTime, Local};
use std::panic::Location;
use std::path::Path;

/// Where a log call originated.
///
/// Built by the logging macros (which also know the enclosing function) or
/// from `#[track_caller]` locations, where the function name is unknown and
/// left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerInfo {
    pub name: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl CallerInfo {
    pub const fn new(name: &'static str, file: &'static str, line: u32) -> Self {
        Self { name, file, line }
    }

    /// Location of the outermost `#[track_caller]` frame
    #[track_caller]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            name: "",
            file: location.file(),
            line: location.line(),
        }
    }

    /// File name without its directories
    pub fn file_name(&self) -> &'static str {
        Path::new(self.file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(self.file)
    }
}

/// Reduce a `type_name` path of a marker item to the name of the function
/// that contains it.
///
/// `my_app::net::connect::__here` becomes `connect`; closure segments are
/// skipped so a call inside a closure is attributed to the enclosing function.
#[doc(hidden)]
pub fn enclosing_function(path: &'static str) -> &'static str {
    let mut path = path.strip_suffix("::__here").unwrap_or(path);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path.rsplit("::").next().unwrap_or(path)
}

/// One log call, consumed by the formatter and the sinks and then discarded
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    pub message: &'a str,
    pub tag: Option<&'a str>,
    pub caller: CallerInfo,
    pub timestamp: DateTime<Local>,
    pub colors: ConsoleColors,
}

impl<'a> LogRecord<'a> {
    pub fn new(level: LogLevel, message: &'a str, caller: CallerInfo) -> Self {
        Self {
            level,
            message,
            tag: None,
            caller,
            timestamp: Local::now(),
            colors: level.colors(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: Option<&'a str>) -> Self {
        self.tag = tag;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ConsoleColors) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
