//! Logging facade
//!
//! [`Log`] owns the configuration, the listener set and the sinks. Every log
//! call runs one full cycle (format, console, files, listeners) while holding
//! a single re-entrant lock, so records from concurrent threads never
//! interleave and always see a consistent configuration.
//!
//! The lock is re-entrant so that a listener may log, and so that the panic
//! hook can report a panic raised by a listener in the middle of a call. A
//! panic raised on a thread that is running listeners is written to the sinks
//! only; calling the listeners again from inside the hook could panic there
//! and abort the process.
//!
//! [`Log::trace`] through [`Log::critical`] are untagged shorthands. Tagged
//! records go through [`Log::log`], [`Log::record`] or the `tag:` form of the
//! logging macros.

use super::{
    appender::Appender,
    config::{InitOptions, LogConfig},
    detail_level::DetailLevel,
    error::Result,
    formatter::{format_record, FormatOptions, TagStyle},
    listener::{ListenerSet, LogListener},
    log_level::{ConsoleColors, LogLevel},
    log_record::{CallerInfo, LogRecord},
    metrics::LoggerMetrics,
    panic_hook::{self, HookId, ObserverId, PanicObserver, PanicReport},
    timestamp::{validate_strftime, TimestampFormat},
};
use crate::appenders::file::ensure_folder;
use crate::appenders::{ConsoleAppender, ConsoleSettings, FileAppender, LATEST_FILE_NAME};
use crate::retention::{self, CleanupReport, RetentionPolicy, RetentionTask};
use chrono::Local;
use parking_lot::ReentrantMutex;
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::SystemTime;

/// Caller attributed to records produced by the panic hook
const PANIC_HOOK_CALLER: CallerInfo = CallerInfo::new("panic_hook", "osiris_log", 0);

thread_local! {
    /// Set while this thread is inside a listener callback
    static IN_LISTENER: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as running listeners until dropped, unwinding included
struct ListenerScope {
    previous: bool,
}

impl ListenerScope {
    fn enter() -> Self {
        Self {
            previous: IN_LISTENER.with(|flag| flag.replace(true)),
        }
    }

    fn active() -> bool {
        IN_LISTENER.with(Cell::get)
    }
}

impl Drop for ListenerScope {
    fn drop(&mut self) {
        IN_LISTENER.with(|flag| flag.set(self.previous));
    }
}

/// Handle to one logging facility. Clones share all state.
#[derive(Clone)]
pub struct Log {
    shared: Arc<Shared>,
}

struct Shared {
    state: ReentrantMutex<RefCell<LogState>>,
    metrics: LoggerMetrics,
    panic_hook: OnceLock<HookId>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(id) = self.panic_hook.get() {
            panic_hook::unregister(*id);
        }
    }
}

struct LogState {
    initialized: bool,
    /// Empty when file logging is disabled
    log_folder: PathBuf,
    log_file_name: String,
    retention: RetentionPolicy,
    format: FormatOptions,
    console: ConsoleSettings,
    /// Console first, then the dated file, then `latest.txt`
    sinks: Arc<Vec<Box<dyn Appender>>>,
    listeners: ListenerSet,
    panic_observers: Vec<(ObserverId, PanicObserver)>,
    next_observer_id: u64,
    retention_task: Option<RetentionTask>,
}

impl LogState {
    fn new(format: FormatOptions, console: ConsoleSettings) -> Self {
        let mut state = Self {
            initialized: false,
            log_folder: PathBuf::new(),
            log_file_name: String::new(),
            retention: RetentionPolicy::default(),
            format,
            console,
            sinks: Arc::new(Vec::new()),
            listeners: ListenerSet::default(),
            panic_observers: Vec::new(),
            next_observer_id: 0,
            retention_task: None,
        };
        state.rebuild_sinks();
        state
    }

    fn file_logging_enabled(&self) -> bool {
        !self.log_folder.as_os_str().is_empty()
    }

    fn rebuild_sinks(&mut self) {
        let mut sinks: Vec<Box<dyn Appender>> = Vec::with_capacity(3);
        if self.console.enabled {
            sinks.push(Box::new(ConsoleAppender::with_colors(self.console.colors)));
        }
        if self.file_logging_enabled() {
            sinks.push(Box::new(FileAppender::new(self.log_folder.join(&self.log_file_name))));
            sinks.push(Box::new(FileAppender::new(self.log_folder.join(LATEST_FILE_NAME))));
        }
        self.sinks = Arc::new(sinks);
    }
}

impl Log {
    /// Uninitialized facade with default settings: detailed output, console
    /// only, no listeners
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(FormatOptions::default(), ConsoleSettings::default())
    }

    #[must_use]
    pub fn builder() -> LogBuilder {
        LogBuilder::new()
    }

    /// Build and initialize a facade from a complete configuration
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or initialization fails
    pub fn from_config(config: &LogConfig) -> Result<Self> {
        config.validate()?;
        LogBuilder::from_config(config).init(config.init.clone())
    }

    fn from_parts(format: FormatOptions, console: ConsoleSettings) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: ReentrantMutex::new(RefCell::new(LogState::new(format, console))),
                metrics: LoggerMetrics::new(),
                panic_hook: OnceLock::new(),
            }),
        }
    }

    /// Finalize the configuration.
    ///
    /// With a log folder: creates the folder (recursively), creates the dated
    /// log file and `latest.txt` (truncating any previous content) and starts
    /// the retention task. Always registers with the panic hook.
    ///
    /// Calling it again fully resets the file target and retention policy;
    /// the previous retention task is told to stop and the panic hook
    /// registration is kept. The registration ends when the last handle is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns error if the options are invalid or the folder or files cannot
    /// be created. The configuration is left unchanged in that case.
    pub fn initialize(&self, options: InitOptions) -> Result<()> {
        options.validate()?;

        let guard = self.shared.state.lock();

        let folder = options.folder().map(Path::to_path_buf).unwrap_or_default();
        let mut file_name = String::new();
        if let Some(folder) = options.folder() {
            ensure_folder(folder)?;
            file_name = Local::now().format(&options.file_name_format).to_string();
            FileAppender::create(folder.join(&file_name))?;
            FileAppender::create(folder.join(LATEST_FILE_NAME))?;
        }

        let task = if options.file_logging_enabled() {
            Some(self.spawn_retention(folder.clone(), options.retention.clone())?)
        } else {
            None
        };

        {
            let mut state = guard.borrow_mut();
            state.initialized = true;
            state.log_folder = folder;
            state.log_file_name = file_name;
            state.retention = options.retention;
            state.rebuild_sinks();
            if let Some(mut previous) = std::mem::replace(&mut state.retention_task, task) {
                // Not joined: the old task may be waiting on this lock to report.
                previous.signal_stop();
            }
        }

        self.shared.panic_hook.get_or_init(|| {
            let weak = Arc::downgrade(&self.shared);
            panic_hook::register(move |report| {
                if let Some(shared) = weak.upgrade() {
                    Log { shared }.handle_panic(report);
                }
            })
        });

        Ok(())
    }

    fn spawn_retention(&self, folder: PathBuf, policy: RetentionPolicy) -> Result<RetentionTask> {
        let weak = Arc::downgrade(&self.shared);
        RetentionTask::spawn(folder, policy, move |outcome| {
            let Some(shared) = weak.upgrade() else {
                return false;
            };
            Log { shared }.report_cleanup(&outcome);
            true
        })
    }

    /// Stop the retention task, waiting for an in-flight pass to finish.
    ///
    /// Logging keeps working; only the periodic cleanup ends.
    pub fn shutdown(&self) -> bool {
        let task = {
            let guard = self.shared.state.lock();
            let mut state = guard.borrow_mut();
            state.retention_task.take()
        };
        task.map_or(true, RetentionTask::stop)
    }

    /// Run a cleanup pass right now with the configured policy.
    ///
    /// Failures are logged as warnings, exactly like the periodic pass. A
    /// folder that could not be listed shows up in [`CleanupReport::error`].
    pub fn run_cleanup(&self) -> CleanupReport {
        let (folder, policy) = {
            let guard = self.shared.state.lock();
            let state = guard.borrow();
            if !state.file_logging_enabled() {
                return CleanupReport::default();
            }
            (state.log_folder.clone(), state.retention.clone())
        };

        let outcome = retention::cleanup(&folder, &policy, SystemTime::now());
        self.report_cleanup(&outcome);
        outcome
    }

    fn report_cleanup(&self, report: &CleanupReport) {
        for _ in &report.removed {
            self.shared.metrics.record_file_removed();
        }
        for failure in &report.failures {
            self.shared.metrics.record_cleanup_failure();
            crate::warning!(self, "Failed to clean up log file '{}'", failure.path.display());
            crate::exception!(self, &failure.error, LogLevel::Warning);
        }
        if let Some(e) = &report.error {
            self.shared.metrics.record_cleanup_failure();
            crate::warning!(self, "Log cleanup pass failed");
            crate::exception!(self, e, LogLevel::Warning);
        }
        self.shared.metrics.record_cleanup_pass();
    }

    // ------------------------------------------------------------------
    // Emission
    // ------------------------------------------------------------------

    /// Log one record attributed to `caller`. The logging macros expand to this.
    pub fn record(&self, level: LogLevel, message: &str, tag: Option<&str>, caller: CallerInfo) {
        self.emit(level, message, tag, None, caller, true);
    }

    /// Log one record with explicit console colors
    pub fn custom(
        &self,
        level: LogLevel,
        message: &str,
        tag: Option<&str>,
        colors: ConsoleColors,
        caller: CallerInfo,
    ) {
        self.emit(level, message, tag, Some(colors), caller, true);
    }

    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        tag: Option<&str>,
        colors: Option<ConsoleColors>,
        caller: CallerInfo,
        notify_listeners: bool,
    ) {
        let guard = self.shared.state.lock();

        // Snapshot, then release the borrow: sinks and listeners may call
        // back into this facade.
        let (format, sinks, listeners) = {
            let state = guard.borrow();
            (
                state.format.clone(),
                Arc::clone(&state.sinks),
                notify_listeners.then(|| state.listeners.snapshot()),
            )
        };

        let mut record = LogRecord::new(level, message, caller).with_tag(tag);
        if let Some(colors) = colors {
            record = record.with_colors(colors);
        }
        let line = format_record(&record, &format);

        for sink in sinks.iter() {
            if let Err(e) = sink.append(&record, &line) {
                self.shared.metrics.record_write_failure();
                eprintln!("[LOGGER ERROR] {} appender failed: {}", sink.name(), e);
            }
        }

        if let Some(listeners) = listeners {
            let _scope = ListenerScope::enter();
            for listener in listeners.iter() {
                listener.log(level, message);
            }
        }

        self.shared.metrics.record_emitted();
        drop(guard);
    }

    /// Log at `level`, attributing the record to the calling location.
    ///
    /// The tagged entry point among the methods; the per-level shorthands
    /// below never carry a tag.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>, tag: Option<&str>) {
        self.record(level, message.as_ref(), tag, CallerInfo::here());
    }

    /// Untagged `Trace` record; see [`Log::log`] for a tagged one
    #[track_caller]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.record(LogLevel::Trace, message.as_ref(), None, CallerInfo::here());
    }

    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.record(LogLevel::Debug, message.as_ref(), None, CallerInfo::here());
    }

    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.record(LogLevel::Information, message.as_ref(), None, CallerInfo::here());
    }

    #[track_caller]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.record(LogLevel::Warning, message.as_ref(), None, CallerInfo::here());
    }

    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.record(LogLevel::Error, message.as_ref(), None, CallerInfo::here());
    }

    #[track_caller]
    pub fn critical(&self, message: impl AsRef<str>) {
        self.record(LogLevel::Critical, message.as_ref(), None, CallerInfo::here());
    }

    /// Log an error: its message, then its `source()` chain as a second record
    /// when there is one. Both records are attributed to the calling location
    /// and are written back to back.
    #[track_caller]
    pub fn log_exception(&self, error: &dyn Error, level: LogLevel) {
        self.log_exception_at(error, level, CallerInfo::here());
    }

    pub fn log_exception_at(&self, error: &dyn Error, level: LogLevel, caller: CallerInfo) {
        let detail = source_chain(error);
        self.record_pair(level, &error.to_string(), detail.as_deref(), caller, true);
    }

    fn record_pair(
        &self,
        level: LogLevel,
        message: &str,
        detail: Option<&str>,
        caller: CallerInfo,
        notify_listeners: bool,
    ) {
        let _guard = self.shared.state.lock();
        self.emit(level, message, None, None, caller, notify_listeners);
        if let Some(detail) = detail {
            self.emit(level, detail, None, None, caller, notify_listeners);
        }
    }

    fn handle_panic(&self, report: &PanicReport) {
        // A listener that panics here would panic inside the hook.
        let notify_listeners = !ListenerScope::active();
        let observers: Vec<PanicObserver> = {
            let guard = self.shared.state.lock();
            self.record_pair(
                LogLevel::Error,
                &report.to_string(),
                report.backtrace.as_deref(),
                PANIC_HOOK_CALLER,
                notify_listeners,
            );
            let state = guard.borrow();
            let observers: Vec<PanicObserver> =
                state.panic_observers.iter().map(|(_, o)| Arc::clone(o)).collect();
            observers
        };

        for observer in observers {
            observer(std::any::type_name::<Log>(), report);
        }
    }

    // ------------------------------------------------------------------
    // Listeners and observers
    // ------------------------------------------------------------------

    pub fn add_listener(&self, listener: Arc<dyn LogListener>) {
        let guard = self.shared.state.lock();
        guard.borrow_mut().listeners.add(listener);
    }

    /// Remove one registration of `listener`; `false` if it was not registered
    pub fn remove_listener(&self, listener: &Arc<dyn LogListener>) -> bool {
        let guard = self.shared.state.lock();
        let removed = guard.borrow_mut().listeners.remove(listener);
        removed
    }

    pub fn listener_count(&self) -> usize {
        let guard = self.shared.state.lock();
        let count = guard.borrow().listeners.len();
        count
    }

    /// Subscribe to unhandled panics observed by the panic hook
    pub fn on_unhandled_panic<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&'static str, &PanicReport) + Send + Sync + 'static,
    {
        let guard = self.shared.state.lock();
        let mut state = guard.borrow_mut();
        let id = ObserverId(state.next_observer_id);
        state.next_observer_id += 1;
        state.panic_observers.push((id, Arc::new(observer)));
        id
    }

    pub fn remove_panic_observer(&self, id: ObserverId) -> bool {
        let guard = self.shared.state.lock();
        let mut state = guard.borrow_mut();
        let before = state.panic_observers.len();
        state.panic_observers.retain(|(existing, _)| *existing != id);
        state.panic_observers.len() != before
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        let guard = self.shared.state.lock();
        let initialized = guard.borrow().initialized;
        initialized
    }

    pub fn file_logging_enabled(&self) -> bool {
        let guard = self.shared.state.lock();
        let enabled = guard.borrow().file_logging_enabled();
        enabled
    }

    pub fn log_folder(&self) -> Option<PathBuf> {
        let guard = self.shared.state.lock();
        let state = guard.borrow();
        let folder = state
            .file_logging_enabled()
            .then(|| state.log_folder.clone());
        folder
    }

    /// Path of this run's dated log file
    pub fn log_file_path(&self) -> Option<PathBuf> {
        let guard = self.shared.state.lock();
        let state = guard.borrow();
        let path = state
            .file_logging_enabled()
            .then(|| state.log_folder.join(&state.log_file_name));
        path
    }

    pub fn latest_file_path(&self) -> Option<PathBuf> {
        self.log_folder().map(|folder| folder.join(LATEST_FILE_NAME))
    }

    pub fn retention_policy(&self) -> RetentionPolicy {
        let guard = self.shared.state.lock();
        let policy = guard.borrow().retention.clone();
        policy
    }

    pub fn detail_level(&self) -> DetailLevel {
        let guard = self.shared.state.lock();
        let detail = guard.borrow().format.detail;
        detail
    }

    /// Takes effect for subsequent calls
    pub fn set_detail_level(&self, detail: DetailLevel) {
        let guard = self.shared.state.lock();
        guard.borrow_mut().format.detail = detail;
    }

    pub fn timestamp_format(&self) -> TimestampFormat {
        let guard = self.shared.state.lock();
        let format = guard.borrow().format.timestamp_format.clone();
        format
    }

    /// # Errors
    ///
    /// Returns error if a custom format holds an invalid strftime specifier
    pub fn set_timestamp_format(&self, format: TimestampFormat) -> Result<()> {
        if let TimestampFormat::Custom(format_str) = &format {
            validate_strftime(format_str)?;
        }
        let guard = self.shared.state.lock();
        guard.borrow_mut().format.timestamp_format = format;
        Ok(())
    }

    /// Shorthand for a custom strftime timestamp format
    ///
    /// # Errors
    ///
    /// Returns error if `format_str` holds an invalid strftime specifier
    pub fn set_date_time_format(&self, format_str: &str) -> Result<()> {
        self.set_timestamp_format(TimestampFormat::custom(format_str)?)
    }

    pub fn tag_style(&self) -> TagStyle {
        let guard = self.shared.state.lock();
        let style = guard.borrow().format.tag_style;
        style
    }

    pub fn set_tag_style(&self, style: TagStyle) {
        let guard = self.shared.state.lock();
        guard.borrow_mut().format.tag_style = style;
    }

    pub fn set_console(&self, console: ConsoleSettings) {
        let guard = self.shared.state.lock();
        let mut state = guard.borrow_mut();
        state.console = console;
        state.rebuild_sinks();
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use osiris_log::Log;
    ///
    /// let log = Log::builder().console(false).build();
    /// log.info("hello");
    /// assert_eq!(log.metrics().records_emitted(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Log")
            .field("initialized", &self.is_initialized())
            .field("log_folder", &self.log_folder())
            .field("detail_level", &self.detail_level())
            .finish_non_exhaustive()
    }
}

/// `caused by:` lines for every error below `error`, if any
fn source_chain(error: &dyn Error) -> Option<String> {
    let mut lines = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {}", cause));
        source = cause.source();
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Builder for constructing a [`Log`] with a fluent API
///
/// # Example
/// ```
/// use osiris_log::prelude::*;
///
/// let log = Log::builder()
///     .detail_level(DetailLevel::Basic)
///     .tag_style(TagStyle::Delimited)
///     .colors(false)
///     .listener(|level: LogLevel, message: &str| {
///         assert!(!message.is_empty());
///         let _ = level;
///     })
///     .build();
///
/// assert!(!log.is_initialized());
/// ```
pub struct LogBuilder {
    format: FormatOptions,
    console: ConsoleSettings,
    listeners: Vec<Arc<dyn LogListener>>,
    panic_observers: Vec<PanicObserver>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self {
            format: FormatOptions::default(),
            console: ConsoleSettings::default(),
            listeners: Vec::new(),
            panic_observers: Vec::new(),
        }
    }

    /// Builder preloaded with the formatting and console part of `config`
    pub fn from_config(config: &LogConfig) -> Self {
        Self::new()
            .detail_level(config.detail_level)
            .timestamp_format(config.timestamp_format.clone())
            .tag_style(config.tag_style)
            .console_settings(config.console)
    }

    #[must_use = "builder methods return a new value"]
    pub fn detail_level(mut self, detail: DetailLevel) -> Self {
        self.format.detail = detail;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.format.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tag_style(mut self, style: TagStyle) -> Self {
        self.format.tag_style = style;
        self
    }

    /// Enable or disable console output
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, enabled: bool) -> Self {
        self.console.enabled = enabled;
        self
    }

    /// Enable or disable console colors
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.console.colors = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_settings(mut self, console: ConsoleSettings) -> Self {
        self.console = console;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn listener<L: LogListener + 'static>(mut self, listener: L) -> Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_unhandled_panic<F>(mut self, observer: F) -> Self
    where
        F: Fn(&'static str, &PanicReport) + Send + Sync + 'static,
    {
        self.panic_observers.push(Arc::new(observer));
        self
    }

    /// Build an uninitialized [`Log`]
    pub fn build(self) -> Log {
        let log = Log::from_parts(self.format, self.console);
        {
            let guard = log.shared.state.lock();
            let mut state = guard.borrow_mut();
            for listener in self.listeners {
                state.listeners.add(listener);
            }
            for observer in self.panic_observers {
                let id = ObserverId(state.next_observer_id);
                state.next_observer_id += 1;
                state.panic_observers.push((id, observer));
            }
        }
        log
    }

    /// Build and initialize in one step
    ///
    /// # Errors
    ///
    /// Returns error if initialization fails
    pub fn init(self, options: InitOptions) -> Result<Log> {
        let log = self.build();
        log.initialize(options)?;
        Ok(log)
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
