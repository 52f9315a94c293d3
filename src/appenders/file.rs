//! File appender implementation

use crate::core::{Appender, LogRecord, LoggerError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the file that mirrors the current run's dated log file
pub const LATEST_FILE_NAME: &str = "latest.txt";

/// Appends records to one log file.
///
/// The file is opened in append mode for every record and closed again, so
/// a file removed between two writes is recreated instead of written to a
/// dangling handle.
pub struct FileAppender {
    path: PathBuf,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create (or truncate) the file and return an appender for it
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        File::create(&path).map_err(|e| {
            LoggerError::file_appender(
                path.display().to_string(),
                format!("Failed to create: {}", e),
            )
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&self, _record: &LogRecord<'_>, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::file_appender(
                    self.path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        let mut output = String::with_capacity(line.len() + 1);
        output.push_str(line);
        output.push('\n');

        file.write_all(output.as_bytes()).map_err(|e| {
            LoggerError::file_appender(
                self.path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Ensure the log folder exists, creating parents as needed
pub(crate) fn ensure_folder(folder: &Path) -> Result<()> {
    fs::create_dir_all(folder).map_err(|e| {
        LoggerError::io_operation(
            "create log directory",
            format!("Failed to create directory '{}'", folder.display()),
            e,
        )
    })
}
