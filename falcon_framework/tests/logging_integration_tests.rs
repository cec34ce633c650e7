//! Integration tests for the logging system
//!
//! Run with: cargo test --test logging_integration_tests


use std::sync::{Arc, Mutex};

use backend_test_utils::{RecordingBackend, TestPlatform};
use falcon_framework::falcon::log::{set_logger, reset_logger, LogEntry, LogSeverity, Logger};
use falcon_framework::falcon::{App, Application, Services};
use serial_test::serial;

struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

struct Quiet;

impl App for Quiet {}

#[test]
#[serial]
fn test_integration_lifecycle_is_logged() {
    let (logger, entries) = TestLogger::new();
    set_logger(logger);

    let backend = RecordingBackend::new();
    let mut app = Application::new(Quiet, Services::new(Box::new(backend)));
    let mut platform = TestPlatform::new(320, 240);
    app.setup(&[]).unwrap();
    app.init_cb(&mut platform).unwrap();
    app.frame_cb(&mut platform).unwrap();
    app.cleanup_cb(&mut platform).unwrap();

    reset_logger();

    let entries = entries.lock().unwrap();
    let lifecycle: Vec<&LogEntry> = entries
        .iter()
        .filter(|e| e.source == "falcon::Application")
        .collect();
    assert!(lifecycle.iter().any(|e| e.severity == LogSeverity::Debug
        && e.message == "Running -> CleaningUp"));
    assert!(lifecycle.iter().any(|e| e.severity == LogSeverity::Info
        && e.message == "fetch service released"));
    assert!(entries.iter().any(|e| e.source == "falcon::gfx"
        && e.message == "GPU backend context released"));
}

#[test]
#[serial]
fn test_integration_fail_channel_is_logged_with_location() {
    let (logger, entries) = TestLogger::new();
    set_logger(logger);

    let mut app = Application::new(Quiet, Services::new(Box::new(RecordingBackend::new())));
    app.fail_cb("device lost");

    reset_logger();

    let entries = entries.lock().unwrap();
    let failure = entries
        .iter()
        .find(|e| e.message == "device lost")
        .expect("fail message logged");
    assert_eq!(failure.severity, LogSeverity::Error);
    assert!(failure.file.is_some());
    assert!(failure.line.is_some());
}
