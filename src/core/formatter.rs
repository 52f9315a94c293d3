//! Record formatting
//!
//! Output is built by concatenating, in order:
//!
//! | field | present when |
//! |---|---|
//! | `(timestamp) ` | detail >= `Basic` |
//! | `<file@function:line> ` | detail >= `Detailed` |
//! | `[CODE] ` | detail >= `Basic` |
//! | tag | always, rendered per [`TagStyle`] |
//! | message | always, verbatim |
//!
//! No trailing newline is added; the sinks own line termination.

use super::detail_level::DetailLevel;
use super::error::LoggerError;
use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

/// How a record's tag is placed in front of its message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagStyle {
    /// Tag text immediately followed by the message, no separator
    #[default]
    Raw,
    /// `|tag| ` followed by the message
    Delimited,
}

impl FromStr for TagStyle {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(TagStyle::Raw),
            "delimited" => Ok(TagStyle::Delimited),
            _ => Err(LoggerError::parse("tag style", s)),
        }
    }
}

/// Settings read by [`format_record`], snapshotted once per log call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub detail: DetailLevel,
    pub timestamp_format: TimestampFormat,
    pub tag_style: TagStyle,
}

pub fn format_record(record: &LogRecord<'_>, options: &FormatOptions) -> String {
    let mut output = String::with_capacity(record.message.len() + 64);

    if options.detail >= DetailLevel::Basic {
        let _ = write!(
            output,
            "({}) ",
            options.timestamp_format.format(&record.timestamp)
        );
    }
    if options.detail >= DetailLevel::Detailed {
        let caller = &record.caller;
        if caller.name.is_empty() {
            let _ = write!(output, "<{}:{}> ", caller.file_name(), caller.line);
        } else {
            let _ = write!(
                output,
                "<{}@{}:{}> ",
                caller.file_name(),
                caller.name,
                caller.line
            );
        }
    }
    if options.detail >= DetailLevel::Basic {
        let _ = write!(output, "[{}] ", record.level.short_code());
    }

    if let Some(tag) = record.tag {
        match options.tag_style {
            TagStyle::Raw => output.push_str(tag),
            TagStyle::Delimited if !tag.is_empty() => {
                let _ = write!(output, "|{}| ", tag);
            }
            TagStyle::Delimited => {}
        }
    }

    output.push_str(record.message);
    output
}
