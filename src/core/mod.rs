//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod detail_level;
pub mod error;
pub mod formatter;
pub mod listener;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod panic_hook;
pub mod timestamp;

pub use appender::Appender;
pub use config::{InitOptions, LogConfig, DEFAULT_FILE_NAME_FORMAT};
pub use detail_level::DetailLevel;
pub use error::{LoggerError, Result};
pub use formatter::{format_record, FormatOptions, TagStyle};
pub use listener::LogListener;
pub use log_level::{ConsoleColors, LogLevel};
pub use log_record::{CallerInfo, LogRecord};
pub use logger::{Log, LogBuilder};
pub use metrics::LoggerMetrics;
pub use panic_hook::{ObserverId, PanicObserver, PanicReport};
pub use timestamp::TimestampFormat;
