//! Appender trait for log output destinations

use super::{error::Result, log_record::LogRecord};

/// A destination for formatted records.
///
/// Appenders are shared with every logging thread and take `&self`; the
/// facade serializes calls, so implementations need no locking of their own.
pub trait Appender: Send + Sync {
    /// Write one already-formatted record. `line` carries no newline.
    fn append(&self, record: &LogRecord<'_>, line: &str) -> Result<()>;
    fn name(&self) -> &str;
}
