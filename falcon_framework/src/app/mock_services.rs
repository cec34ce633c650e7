//! Mock host services for unit tests
//!
//! Every mock appends to a shared [`Journal`] so tests can assert on the
//! interleaved order of acquisition, per-frame work and release.

use std::collections::VecDeque;
use slotmap::SlotMap;

use crate::app::args::Args;
use crate::app::fetch::{Fetch, FetchDesc, FetchHandle, FetchResponse};
use crate::app::platform::Platform;
use crate::app::timer::Timer;
use crate::error::Result;
use crate::gfx::ContextDesc;
use crate::test_utils::Journal;

fn note(journal: &Journal, entry: &str) {
    journal.lock().unwrap().push(entry.to_string());
}

// ===== TIMER =====

/// Timer returning scripted lap values, one per `lap_time` call
///
/// Ticks are milliseconds. An exhausted script keeps returning 0.
pub struct MockTimer {
    laps: VecDeque<u64>,
    journal: Journal,
}

impl MockTimer {
    pub fn new(laps: &[u64], journal: Journal) -> Self {
        Self {
            laps: laps.iter().copied().collect(),
            journal,
        }
    }
}

impl Timer for MockTimer {
    fn setup(&mut self) {
        note(&self.journal, "timer.setup");
    }

    fn lap_time(&mut self, last: &mut u64) -> u64 {
        note(&self.journal, "timer.lap");
        let lap = self.laps.pop_front().unwrap_or(0);
        *last += lap.max(1);
        lap
    }

    fn to_seconds(&self, ticks: u64) -> f64 {
        ticks as f64 / 1000.0
    }
}

// ===== FETCH =====

/// Fetch service whose requests complete on the next `do_work`
pub struct MockFetch {
    journal: Journal,
    requests: SlotMap<FetchHandle, (String, bool)>,
    pub fail_setup: bool,
}

impl MockFetch {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            requests: SlotMap::with_key(),
            fail_setup: false,
        }
    }
}

impl Fetch for MockFetch {
    fn setup(&mut self, _desc: &FetchDesc) -> Result<()> {
        note(&self.journal, "fetch.setup");
        if self.fail_setup {
            return Err(crate::error::Error::InitializationFailed("mock fetch".to_string()));
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        note(&self.journal, "fetch.shutdown");
        self.requests.clear();
    }

    fn send(&mut self, path: &str) -> FetchHandle {
        note(&self.journal, &format!("fetch.send {}", path));
        self.requests.insert((path.to_string(), false))
    }

    fn do_work(&mut self) {
        note(&self.journal, "fetch.do_work");
        for (_, (_, done)) in self.requests.iter_mut() {
            *done = true;
        }
    }

    fn take(&mut self, handle: FetchHandle) -> Option<FetchResponse> {
        match self.requests.get(handle) {
            Some((_, true)) => self.requests.remove(handle).map(|(path, _)| FetchResponse {
                result: Ok(path.as_bytes().to_vec()),
                path,
            }),
            _ => None,
        }
    }
}

// ===== ARGS =====

/// Argument service recording setup and shutdown, backed by `KeyValueArgs`
pub struct MockArgs {
    journal: Journal,
    inner: crate::app::args::KeyValueArgs,
}

impl MockArgs {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            inner: Default::default(),
        }
    }
}

impl Args for MockArgs {
    fn setup(&mut self, argv: &[String]) -> Result<()> {
        note(&self.journal, "args.setup");
        self.inner.setup(argv)
    }

    fn shutdown(&mut self) {
        note(&self.journal, "args.shutdown");
        self.inner.shutdown();
    }

    fn value(&self, key: &str) -> Option<&str> {
        self.inner.value(key)
    }
}

// ===== PLATFORM =====

/// Fixed-size platform counting quit requests
#[derive(Debug, Default)]
pub struct MockPlatform {
    pub width: i32,
    pub height: i32,
    pub gles2: bool,
    pub quit_requests: usize,
}

impl MockPlatform {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

impl Platform for MockPlatform {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn is_gles2(&self) -> bool {
        self.gles2
    }

    fn gfx_context(&self) -> ContextDesc {
        ContextDesc {
            sample_count: 1,
            gles2: self.gles2,
            ..Default::default()
        }
    }

    fn request_quit(&mut self) {
        self.quit_requests += 1;
    }
}
