//! Console appender implementation

use crate::core::{Appender, LogRecord, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Console output switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    pub enabled: bool,
    pub colors: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colors: true,
        }
    }
}

/// Writes each record as one stdout line in the record's colors
pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Colored text, reset, then the newline as a separate write so the
    /// background color never bleeds into the next line.
    fn write_line(&self, out: &mut impl Write, record: &LogRecord<'_>, line: &str) -> io::Result<()> {
        if self.use_colors {
            let painted = line
                .on_color(record.colors.background)
                .color(record.colors.foreground);
            write!(out, "{}", painted)?;
        } else {
            out.write_all(line.as_bytes())?;
        }
        out.write_all(b"\n")?;
        out.flush()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, record: &LogRecord<'_>, line: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_line(&mut out, record, line)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
