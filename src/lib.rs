//! # Osiris Log
//!
//! Process-wide structured logging: one facade that formats each record,
//! writes it to the console (colored per level), to a dated log file and to
//! `latest.txt`, and forwards it to registered listeners.
//!
//! ## Features
//!
//! - **Serialized output**: every log call completes under one lock, so lines
//!   from concurrent threads never interleave
//! - **Detail levels**: from bare `tag + message` up to timestamp, caller and
//!   severity code
//! - **Retention**: a background task prunes the log folder by age and count
//! - **Panic reporting**: unhandled panics are logged before the default hook runs
//!
//! ## Example
//!
//! ```no_run
//! use osiris_log::prelude::*;
//! use osiris_log::info;
//!
//! # fn main() -> osiris_log::Result<()> {
//! let log = Log::builder()
//!     .detail_level(DetailLevel::Detailed)
//!     .init(InitOptions::new().with_log_folder("logs").with_max_log_files(10))?;
//!
//! info!(log, "listening on port {}", 8080);
//! info!(log, tag: "net", "client connected");
//! # Ok(())
//! # }
//! ```

pub mod appenders;
pub mod core;
pub mod macros;
pub mod retention;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, ConsoleSettings, FileAppender};
    pub use crate::core::{
        Appender, CallerInfo, ConsoleColors, DetailLevel, InitOptions, Log, LogBuilder, LogConfig,
        LogLevel, LogListener, LoggerError, LoggerMetrics, ObserverId, PanicReport, Result,
        TagStyle, TimestampFormat,
    };
    pub use crate::retention::{AgeComparison, RetentionPolicy};
}

pub use appenders::{ConsoleAppender, ConsoleSettings, FileAppender, LATEST_FILE_NAME};
pub use core::{
    format_record, Appender, CallerInfo, ConsoleColors, DetailLevel, FormatOptions, InitOptions,
    Log, LogBuilder, LogConfig, LogLevel, LogListener, LogRecord, LoggerError, LoggerMetrics,
    ObserverId, PanicObserver, PanicReport, Result, TagStyle, TimestampFormat,
    DEFAULT_FILE_NAME_FORMAT,
};
pub use retention::{AgeComparison, CleanupFailure, CleanupReport, RetentionPolicy, RetentionTask};

// Needed to build `ConsoleColors`
pub use colored::Color;
