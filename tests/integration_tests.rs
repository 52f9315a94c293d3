//! Integration tests for the logging facade
//!
//! These tests verify:
//! - Dated file and `latest.txt` receive identical output
//! - Initialization truncates and creates the log folder
//! - Detail levels and tag styles end to end
//! - Listener delivery and removal
//! - Re-initialization and configuration errors

use osiris_log::prelude::*;
use osiris_log::{info, warning, LATEST_FILE_NAME};
use parking_lot::Mutex;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn quiet_log() -> Log {
    Log::builder().console(false).build()
}

fn file_options(dir: &TempDir) -> InitOptions {
    InitOptions::new()
        .with_log_folder(dir.path())
        .with_cleanup_interval(Duration::from_secs(3600))
}

#[test]
fn test_five_records_reach_latest() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = quiet_log();
    log.initialize(file_options(&temp_dir)).expect("Failed to initialize");

    for _ in 0..5 {
        log.info("x");
    }

    let content = fs::read_to_string(temp_dir.path().join(LATEST_FILE_NAME))
        .expect("Failed to read latest.txt");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    for line in lines {
        assert!(line.contains("[INFO] x"), "unexpected line: {}", line);
        assert!(line.ends_with('x'));
    }
    assert!(content.ends_with('\n'));
    log.shutdown();
}

#[test]
fn test_dated_file_matches_latest() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = quiet_log();
    log.initialize(file_options(&temp_dir)).expect("Failed to initialize");

    info!(log, "first {}", 1);
    warning!(log, tag: "db", "second");

    let dated = log.log_file_path().expect("file logging enabled");
    let latest = log.latest_file_path().expect("file logging enabled");
    assert_ne!(dated, latest);
    assert_eq!(
        fs::read_to_string(&dated).unwrap(),
        fs::read_to_string(&latest).unwrap()
    );
    log.shutdown();
}

#[test]
fn test_initialize_truncates_latest_and_creates_folder() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let folder = temp_dir.path().join("nested").join("logs");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join(LATEST_FILE_NAME), "stale content\n").unwrap();

    let log = quiet_log();
    log.initialize(
        InitOptions::new()
            .with_log_folder(&folder)
            .with_cleanup_interval(Duration::from_secs(3600)),
    )
    .expect("Failed to initialize");

    assert!(log.is_initialized());
    assert!(log.file_logging_enabled());
    assert_eq!(fs::read_to_string(folder.join(LATEST_FILE_NAME)).unwrap(), "");
    assert!(log.log_file_path().unwrap().exists());
    log.shutdown();
}

#[test]
fn test_missing_folder_is_created_recursively() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let folder = temp_dir.path().join("a").join("b").join("c");

    let log = quiet_log();
    log.initialize(InitOptions::new().with_log_folder(&folder))
        .expect("Failed to initialize");
    log.info("hello");

    assert!(folder.join(LATEST_FILE_NAME).exists());
    log.shutdown();
}

#[test]
fn test_console_only_creates_no_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = quiet_log();
    log.initialize(InitOptions::new().with_log_folder(""))
        .expect("Failed to initialize");
    log.info("console only");

    assert!(log.is_initialized());
    assert!(!log.file_logging_enabled());
    assert_eq!(log.log_folder(), None);
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_detail_levels_in_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = Log::builder()
        .console(false)
        .timestamp_format(TimestampFormat::Custom("T".to_string()))
        .init(file_options(&temp_dir))
        .expect("Failed to initialize");

    log.set_detail_level(DetailLevel::None);
    log.log(LogLevel::Warning, "bare", Some("tag"));
    log.set_detail_level(DetailLevel::Basic);
    log.log(LogLevel::Warning, "basic", None);
    log.set_detail_level(DetailLevel::Detailed);
    osiris_log::error!(log, "detailed");

    let content = fs::read_to_string(log.latest_file_path().unwrap()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "tagbare");
    assert_eq!(lines[1], "(T) [WARN] basic");
    assert!(lines[2].starts_with("(T) <integration_tests.rs@test_detail_levels_in_file:"));
    assert!(lines[2].ends_with("> [ERRR] detailed"));
    log.shutdown();
}

#[test]
fn test_track_caller_location_without_function_name() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = Log::builder()
        .console(false)
        .timestamp_format(TimestampFormat::Custom("T".to_string()))
        .init(file_options(&temp_dir))
        .expect("Failed to initialize");

    let line = line!() + 1;
    log.info("located");

    let content = fs::read_to_string(log.latest_file_path().unwrap()).unwrap();
    assert_eq!(
        content.trim_end(),
        format!("(T) <integration_tests.rs:{}> [INFO] located", line)
    );
    log.shutdown();
}

#[test]
fn test_delimited_tag_style() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = Log::builder()
        .console(false)
        .detail_level(DetailLevel::None)
        .tag_style(TagStyle::Delimited)
        .init(file_options(&temp_dir))
        .expect("Failed to initialize");

    info!(log, tag: "net", "connected");
    info!(log, "untagged");

    let content = fs::read_to_string(log.latest_file_path().unwrap()).unwrap();
    assert_eq!(content, "|net| connected\nuntagged\n");
    log.shutdown();
}

#[test]
fn test_custom_colors_do_not_change_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = Log::builder()
        .console(false)
        .detail_level(DetailLevel::None)
        .init(file_options(&temp_dir))
        .expect("Failed to initialize");

    log.custom(
        LogLevel::Information,
        "painted",
        None,
        ConsoleColors::new(osiris_log::Color::Magenta, osiris_log::Color::White),
        CallerInfo::here(),
    );

    let content = fs::read_to_string(log.latest_file_path().unwrap()).unwrap();
    assert_eq!(content, "painted\n");
    log.shutdown();
}

#[test]
fn test_listeners_receive_in_order() {
    let log = quiet_log();
    let seen = Arc::new(Mutex::new(Vec::new()));

    for id in 0..3 {
        let sink = Arc::clone(&seen);
        log.add_listener(Arc::new(move |level: LogLevel, message: &str| {
            sink.lock().push((id, level, message.to_string()));
        }));
    }

    log.log(LogLevel::Debug, "hello", Some("ignored"));

    let seen = seen.lock();
    assert_eq!(seen.len(), 3);
    for (index, (id, level, message)) in seen.iter().enumerate() {
        assert_eq!(*id, index);
        assert_eq!(*level, LogLevel::Debug);
        assert_eq!(message, "hello");
    }
}

#[test]
fn test_remove_unregistered_listener_is_a_noop() {
    let log = quiet_log();
    let registered: Arc<dyn LogListener> = Arc::new(|_: LogLevel, _: &str| {});
    let stranger: Arc<dyn LogListener> = Arc::new(|_: LogLevel, _: &str| {});
    log.add_listener(Arc::clone(&registered));

    assert!(!log.remove_listener(&stranger));
    assert_eq!(log.listener_count(), 1);
    assert!(log.remove_listener(&registered));
    assert_eq!(log.listener_count(), 0);
}

#[test]
fn test_reinitialize_switches_folder() {
    let first = TempDir::new().expect("Failed to create temp dir");
    let second = TempDir::new().expect("Failed to create temp dir");
    let log = quiet_log();

    log.initialize(file_options(&first)).expect("Failed to initialize");
    log.info("one");
    log.initialize(file_options(&second)).expect("Failed to re-initialize");
    log.info("two");

    let old = fs::read_to_string(first.path().join(LATEST_FILE_NAME)).unwrap();
    let new = fs::read_to_string(second.path().join(LATEST_FILE_NAME)).unwrap();
    assert!(old.contains("one") && !old.contains("two"));
    assert!(new.contains("two") && !new.contains("one"));
    assert_eq!(log.log_folder().as_deref(), Some(second.path()));
    log.shutdown();
}

#[test]
fn test_reinitialize_without_folder_disables_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = quiet_log();

    log.initialize(file_options(&temp_dir)).expect("Failed to initialize");
    log.initialize(InitOptions::new()).expect("Failed to re-initialize");
    log.info("console only now");

    assert!(!log.file_logging_enabled());
    let latest = fs::read_to_string(temp_dir.path().join(LATEST_FILE_NAME)).unwrap();
    assert!(latest.is_empty());
}

#[test]
fn test_folder_that_is_a_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let log = quiet_log();
    let result = log.initialize(InitOptions::new().with_log_folder(blocker.join("logs")));

    assert!(result.is_err());
    assert!(!log.is_initialized());
    assert!(!log.file_logging_enabled());
}

#[test]
fn test_invalid_file_name_format_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = quiet_log();
    let result = log.initialize(file_options(&temp_dir).with_file_name_format("%Q"));

    assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_deleted_latest_is_recreated() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = quiet_log();
    log.initialize(file_options(&temp_dir)).expect("Failed to initialize");

    fs::remove_file(temp_dir.path().join(LATEST_FILE_NAME)).unwrap();
    log.info("after delete");

    let content = fs::read_to_string(temp_dir.path().join(LATEST_FILE_NAME)).unwrap();
    assert!(content.contains("after delete"));
    assert_eq!(log.metrics().write_failures(), 0);
    log.shutdown();
}

#[test]
fn test_log_exception_writes_chain() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = Log::builder()
        .console(false)
        .detail_level(DetailLevel::None)
        .init(file_options(&temp_dir))
        .expect("Failed to initialize");

    let err = LoggerError::io_operation(
        "open socket",
        "bind failed",
        std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use"),
    );
    log.log_exception(&err, LogLevel::Error);

    let content = fs::read_to_string(log.latest_file_path().unwrap()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("bind failed"));
    assert_eq!(lines[1], "caused by: address in use");
    log.shutdown();
}

#[test]
fn test_from_config_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let json = format!(
        r#"{{
            "detail_level": "None",
            "console": {{ "enabled": false }},
            "init": {{ "log_folder": {}, "retention": {{ "max_files": 4, "interval": 3600 }} }}
        }}"#,
        serde_json::to_string(temp_dir.path()).unwrap()
    );

    let config = LogConfig::from_json_str(&json).expect("Failed to parse config");
    let log = Log::from_config(&config).expect("Failed to build log");
    log.info("configured");

    assert_eq!(log.retention_policy().max_files, 4);
    let content = fs::read_to_string(temp_dir.path().join(LATEST_FILE_NAME)).unwrap();
    assert_eq!(content, "configured\n");
    log.shutdown();
}

#[test]
fn test_every_level_macro_accepts_a_tag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = Log::builder()
        .console(false)
        .detail_level(DetailLevel::None)
        .init(file_options(&temp_dir))
        .expect("Failed to initialize");

    osiris_log::trace!(log, tag: "t:", "one");
    osiris_log::debug!(log, tag: "d:", "two");
    info!(log, tag: "i:", "three");
    warning!(log, tag: "w:", "four");
    osiris_log::error!(log, tag: "e:", "five");
    osiris_log::critical!(log, tag: "c:", "six");
    log.log(LogLevel::Information, "seven", Some("l:"));
    log.info("untagged");

    let content = fs::read_to_string(log.latest_file_path().unwrap()).unwrap();
    assert_eq!(
        content,
        "t:one\nd:two\ni:three\nw:four\ne:five\nc:six\nl:seven\nuntagged\n"
    );
    log.shutdown();
}
