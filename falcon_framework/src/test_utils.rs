//! Shared helpers for unit tests
//!
//! Tests run in parallel while the logger is global, so captured entries are
//! always filtered by source before asserting on them.

use std::sync::{Arc, Mutex};
use crate::log::{Logger, LogEntry};

/// Ordered record of calls shared between several mocks
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn new_journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

/// Snapshot of a journal's entries
pub fn journal_entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

/// Logger that captures every entry for later inspection
pub struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    pub fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }

    /// Captured entries emitted by `source`
    pub fn from_source(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
        entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.source == source)
            .cloned()
            .collect()
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}
