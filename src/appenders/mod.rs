//! Appender implementations

pub mod console;
pub mod file;

pub use console::{ConsoleAppender, ConsoleSettings};
pub use file::{FileAppender, LATEST_FILE_NAME};

// Re-export trait for convenience
pub use crate::core::Appender;
