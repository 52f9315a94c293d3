//! Log file retention
//!
//! A cleanup pass runs two independent stages over every regular file in the
//! log folder, in order:
//!
//! 1. **Age**: when `max_age` is non-zero, files whose creation time matches
//!    the configured [`AgeComparison`] are deleted.
//! 2. **Count**: when `max_files` is non-zero, files are ordered by last write
//!    time and the oldest are deleted until `max_files` remain.
//!
//! The active dated file and `latest.txt` are not excluded. A failed deletion
//! is recorded and the pass moves on to the next file. A folder that cannot be
//! listed ends the pass; deletions already made stay in the report.
//!
//! [`RetentionTask`] repeats the pass on a background thread at a fixed
//! interval until it is stopped.

use crate::core::error::{LoggerError, Result};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

/// Default pause between two cleanup passes (30 minutes)
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Which files the age stage treats as expired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeComparison {
    /// `created > now + max_age`.
    ///
    /// Only files stamped in the future match. This is the long-standing
    /// behaviour and stays the default until product confirms the intent.
    #[default]
    CreatedAfterFutureThreshold,

    /// `created < now - max_age`: files older than `max_age`
    CreatedBeforePastThreshold,
}

impl AgeComparison {
    pub fn is_expired(&self, created: SystemTime, now: SystemTime, max_age: Duration) -> bool {
        match self {
            AgeComparison::CreatedAfterFutureThreshold => {
                now.checked_add(max_age).is_some_and(|threshold| created > threshold)
            }
            AgeComparison::CreatedBeforePastThreshold => {
                now.checked_sub(max_age).is_some_and(|threshold| created < threshold)
            }
        }
    }
}

/// Limits enforced on the log folder
///
/// # Examples
///
/// ```
/// use osiris_log::retention::{AgeComparison, RetentionPolicy};
/// use std::time::Duration;
///
/// let policy = RetentionPolicy::new()
///     .with_max_files(10)
///     .with_max_age(Duration::from_secs(7 * 24 * 3600))
///     .with_age_comparison(AgeComparison::CreatedBeforePastThreshold);
/// assert!(policy.is_limited());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    /// Files to keep; 0 = unlimited
    pub max_files: usize,
    /// Maximum file age; zero = unlimited
    #[serde(with = "duration_secs")]
    pub max_age: Duration,
    /// Pause between passes of the background task
    #[serde(with = "duration_secs")]
    pub interval: Duration,
    pub age_comparison: AgeComparison,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_files: 0,
            max_age: Duration::ZERO,
            interval: DEFAULT_CLEANUP_INTERVAL,
            age_comparison: AgeComparison::default(),
        }
    }
}

impl RetentionPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_age_comparison(mut self, comparison: AgeComparison) -> Self {
        self.age_comparison = comparison;
        self
    }

    /// Whether any pass can delete anything
    #[must_use]
    pub fn is_limited(&self) -> bool {
        self.max_files > 0 || !self.max_age.is_zero()
    }
}

/// A file the pass could not delete
#[derive(Debug)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Outcome of one cleanup pass
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failures: Vec<CleanupFailure>,
    /// Set when listing the folder failed and the pass stopped early
    pub error: Option<LoggerError>,
}

impl CleanupReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.failures.is_empty() && self.error.is_none()
    }

    /// Whether both stages ran to the end
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    fn remove(&mut self, path: PathBuf) {
        match fs::remove_file(&path) {
            Ok(()) => self.removed.push(path),
            Err(error) => self.failures.push(CleanupFailure { path, error }),
        }
    }
}

struct LogFileInfo {
    path: PathBuf,
    created: SystemTime,
    modified: SystemTime,
}

/// Regular files directly inside `folder`
fn list_files(folder: &Path) -> Result<Vec<LogFileInfo>> {
    let entries = fs::read_dir(folder).map_err(|e| {
        LoggerError::io_operation(
            "list log folder",
            format!("Failed to read '{}'", folder.display()),
            e,
        )
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let metadata = match entry.metadata() {
            Ok(metadata) if metadata.is_file() => metadata,
            // Directories and entries that vanished mid-scan
            _ => continue,
        };
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        // Not every file system records a birth time
        let created = metadata.created().unwrap_or(modified);
        files.push(LogFileInfo {
            path: entry.path(),
            created,
            modified,
        });
    }
    Ok(files)
}

/// Run one cleanup pass over `folder` as of `now`
///
/// Failures to delete single files are collected in the report; a listing
/// failure is stored in [`CleanupReport::error`] next to whatever the pass
/// removed before it.
pub fn cleanup(folder: &Path, policy: &RetentionPolicy, now: SystemTime) -> CleanupReport {
    run_pass(policy, now, || list_files(folder))
}

fn run_pass<L>(policy: &RetentionPolicy, now: SystemTime, mut list: L) -> CleanupReport
where
    L: FnMut() -> Result<Vec<LogFileInfo>>,
{
    let mut report = CleanupReport::default();
    if let Err(e) = run_stages(policy, now, &mut list, &mut report) {
        report.error = Some(e);
    }
    report
}

fn run_stages<L>(
    policy: &RetentionPolicy,
    now: SystemTime,
    list: &mut L,
    report: &mut CleanupReport,
) -> Result<()>
where
    L: FnMut() -> Result<Vec<LogFileInfo>>,
{
    if !policy.max_age.is_zero() {
        for file in list()? {
            if policy
                .age_comparison
                .is_expired(file.created, now, policy.max_age)
            {
                report.remove(file.path);
            }
        }
    }

    if policy.max_files > 0 {
        let mut files = list()?;
        files.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.path.cmp(&b.path)));
        let excess = files.len().saturating_sub(policy.max_files);
        for file in files.into_iter().take(excess) {
            report.remove(file.path);
        }
    }

    Ok(())
}

/// Background thread repeating [`cleanup`] every `policy.interval`.
///
/// The first pass runs immediately. After each pass `report` receives the
/// outcome; returning `false` ends the task. Dropping the task signals the
/// thread to stop without waiting for it.
pub struct RetentionTask {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl RetentionTask {
    /// # Errors
    ///
    /// Returns error if the thread cannot be spawned
    pub fn spawn<F>(folder: PathBuf, policy: RetentionPolicy, report: F) -> Result<Self>
    where
        F: Fn(CleanupReport) -> bool + Send + 'static,
    {
        let (stop, stopped) = bounded::<()>(1);

        let thread = thread::Builder::new()
            .name("osiris-log-retention".to_string())
            .spawn(move || loop {
                let outcome = cleanup(&folder, &policy, SystemTime::now());
                if !report(outcome) {
                    break;
                }
                match stopped.recv_timeout(policy.interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // Stop requested or every sender dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|e| {
                LoggerError::io_operation("spawn retention thread", "thread spawn failed", e)
            })?;

        Ok(Self {
            stop: Some(stop),
            thread: Some(thread),
        })
    }

    /// Ask the thread to exit after its current pass
    pub fn signal_stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.try_send(());
        }
    }

    /// Stop the thread and wait for it to exit
    ///
    /// Returns `false` if the thread panicked.
    pub fn stop(mut self) -> bool {
        self.signal_stop();
        match self.thread.take() {
            // Joining from inside the task would never return
            Some(handle) if handle.thread().id() != thread::current().id() => {
                if handle.join().is_err() {
                    eprintln!("[LOGGER ERROR] Retention thread panicked");
                    return false;
                }
                true
            }
            _ => true,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |handle| handle.is_finished())
    }
}

impl Drop for RetentionTask {
    fn drop(&mut self) {
        self.signal_stop();
    }
}

/// Serde helper storing a `Duration` as whole seconds
pub(crate) mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
