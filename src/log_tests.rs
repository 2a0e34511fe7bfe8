use std::sync::{Arc, Mutex};
use serial_test::serial;
use super::*;

/// Logger that records entries for inspection.
struct RecordingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for RecordingLogger {
    fn log(&self, entry: &LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

fn install_recorder() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    set_logger(RecordingLogger {
        entries: Arc::clone(&entries),
    });
    entries
}

// ============================================================================
// Logger installation and dispatch
// ============================================================================

#[test]
#[serial]
fn test_custom_logger_receives_entries() {
    let entries = install_recorder();

    log(LogSeverity::Info, "cullgraph::test", "hello".to_string());

    let recorded = entries.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].severity, LogSeverity::Info);
    assert_eq!(recorded[0].source, "cullgraph::test");
    assert_eq!(recorded[0].message, "hello");
    assert!(recorded[0].file.is_none());
    drop(recorded);
    reset_logger();
}

#[test]
#[serial]
fn test_detailed_log_carries_file_and_line() {
    let entries = install_recorder();

    log_detailed(
        LogSeverity::Error,
        "cullgraph::test",
        "boom".to_string(),
        file!(),
        line!(),
    );

    let recorded = entries.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].file, Some(file!()));
    assert!(recorded[0].line.is_some());
    drop(recorded);
    reset_logger();
}

#[test]
#[serial]
fn test_macros_format_arguments() {
    let entries = install_recorder();

    crate::cull_warn!("cullgraph::test", "{} geoms dropped", 3);
    crate::cull_error!("cullgraph::test", "bad node '{}'", "root");

    let recorded = entries.lock().unwrap();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].message, "3 geoms dropped");
    assert_eq!(recorded[0].severity, LogSeverity::Warn);
    assert_eq!(recorded[1].message, "bad node 'root'");
    assert_eq!(recorded[1].severity, LogSeverity::Error);
    assert!(recorded[1].file.is_some());
    drop(recorded);
    reset_logger();
}

// ============================================================================
// Severity ordering
// ============================================================================

#[test]
fn test_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}
