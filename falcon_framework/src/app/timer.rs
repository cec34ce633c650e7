//! Monotonic lap timer

use std::time::Instant;

/// Host timer service
///
/// Ticks are opaque; convert them with [`Timer::to_seconds`].
pub trait Timer {
    /// Establish the time baseline
    fn setup(&mut self);

    /// Ticks elapsed since `*last`, then store the current time in `*last`
    ///
    /// A `*last` of 0 means "no previous lap" and yields 0.
    fn lap_time(&mut self, last: &mut u64) -> u64;

    fn to_seconds(&self, ticks: u64) -> f64;
}

/// [`Timer`] backed by [`std::time::Instant`], ticking in nanoseconds
#[derive(Debug, Default)]
pub struct StdTimer {
    start: Option<Instant>,
}

impl StdTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks since `setup`, never 0 once set up
    fn now(&self) -> u64 {
        match self.start {
            Some(start) => (start.elapsed().as_nanos() as u64).max(1),
            None => 0,
        }
    }
}

impl Timer for StdTimer {
    fn setup(&mut self) {
        self.start = Some(Instant::now());
    }

    fn lap_time(&mut self, last: &mut u64) -> u64 {
        let now = self.now();
        let elapsed = if *last == 0 { 0 } else { now.saturating_sub(*last) };
        *last = now;
        elapsed
    }

    fn to_seconds(&self, ticks: u64) -> f64 {
        ticks as f64 / 1_000_000_000.0
    }
}
