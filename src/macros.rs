//! Logging macros for ergonomic log message formatting.
//!
//! Unlike the plain methods on [`Log`](crate::Log), the macros know the name
//! of the function they are invoked from, so records at
//! [`DetailLevel::Detailed`](crate::DetailLevel) show `<file@function:line>`.
//!
//! # Examples
//!
//! ```
//! use osiris_log::prelude::*;
//! use osiris_log::{info, warning};
//!
//! let log = Log::builder().console(false).build();
//!
//! // Basic logging
//! info!(log, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(log, "Server listening on port {}", port);
//!
//! // With a tag
//! warning!(log, tag: "net", "retry {} of {}", 1, 3);
//! ```

/// [`CallerInfo`](crate::CallerInfo) of the invocation site, including the
/// enclosing function's name.
#[macro_export]
macro_rules! caller {
    () => {
        $crate::CallerInfo::new($crate::__function_name!(), file!(), line!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::core::log_record::enclosing_function(__type_name_of(__here))
    }};
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use osiris_log::prelude::*;
/// # let log = Log::builder().console(false).build();
/// use osiris_log::log;
/// log!(log, LogLevel::Information, "Simple message");
/// log!(log, LogLevel::Error, "Error code: {}", 500);
/// log!(log, LogLevel::Warning, tag: "db", "slow query");
/// ```
#[macro_export]
macro_rules! log {
    ($log:expr, $level:expr, tag: $tag:expr, $($arg:tt)+) => {
        $log.record($level, &format!($($arg)+), Some($tag), $crate::caller!())
    };
    ($log:expr, $level:expr, $($arg:tt)+) => {
        $log.record($level, &format!($($arg)+), None, $crate::caller!())
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($log:expr, $($arg:tt)+) => {
        $crate::log!($log, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($log:expr, $($arg:tt)+) => {
        $crate::log!($log, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an information-level message.
#[macro_export]
macro_rules! info {
    ($log:expr, $($arg:tt)+) => {
        $crate::log!($log, $crate::LogLevel::Information, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($log:expr, $($arg:tt)+) => {
        $crate::log!($log, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($log:expr, $($arg:tt)+) => {
        $crate::log!($log, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use osiris_log::prelude::*;
/// # let log = Log::builder().console(false).build();
/// use osiris_log::critical;
/// critical!(log, "Critical failure: {}", "storage offline");
/// ```
#[macro_export]
macro_rules! critical {
    ($log:expr, $($arg:tt)+) => {
        $crate::log!($log, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an error value and its source chain, at `Error` unless a level is given.
///
/// # Examples
///
/// ```
/// # use osiris_log::prelude::*;
/// # let log = Log::builder().console(false).build();
/// use osiris_log::exception;
/// let err = std::fs::read("/does/not/exist").unwrap_err();
/// exception!(log, &err);
/// exception!(log, &err, LogLevel::Warning);
/// ```
#[macro_export]
macro_rules! exception {
    ($log:expr, $err:expr) => {
        $crate::exception!($log, $err, $crate::LogLevel::Error)
    };
    ($log:expr, $err:expr, $level:expr) => {
        $log.log_exception_at($err, $level, $crate::caller!())
    };
}
