//! A listener that panics on every record
//!
//! Kept in its own test binary: the panic hook is process-wide, and any other
//! panic in the process would reach this listener through the hook.

use osiris_log::prelude::*;
use osiris_log::LATEST_FILE_NAME;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_always_panicking_listener_unwinds_to_caller() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = Log::builder()
        .console(false)
        .init(
            InitOptions::new()
                .with_log_folder(temp_dir.path())
                .with_cleanup_interval(Duration::from_secs(3600)),
        )
        .expect("Failed to initialize");

    let listener: Arc<dyn LogListener> = Arc::new(|_: LogLevel, message: &str| {
        panic!("listener rejected '{}'", message);
    });
    log.add_listener(Arc::clone(&listener));

    let result = panic::catch_unwind(AssertUnwindSafe(|| log.info("x")));
    assert!(result.is_err());

    assert!(log.remove_listener(&listener));
    log.info("after removal");

    let content = fs::read_to_string(temp_dir.path().join(LATEST_FILE_NAME)).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    let trigger = lines
        .iter()
        .position(|l| l.ends_with("] x"))
        .expect("trigger record missing");
    let report = lines
        .iter()
        .position(|l| l.contains("listener rejected 'x'"))
        .expect("panic record missing");
    let resumed = lines
        .iter()
        .position(|l| l.ends_with("after removal"))
        .expect("record after removal missing");
    assert!(trigger < report);
    assert!(report < resumed);
    assert!(lines[report].contains("[ERRR] "));
    log.shutdown();
}
