//! Elapsed-time sources for budgeted searches.
//!
//! The search only ever asks "how many milliseconds have passed since this
//! request started", so the clock is a read-only counter relative to its
//! own construction.

use std::cell::Cell;
use std::time::Instant;

/// Read-only clock relative to the start of the current request.
pub trait Clock {
    /// Milliseconds elapsed since the clock was started.
    fn elapsed_ms(&self) -> u64;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for WallClock {
    #[inline]
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Deterministic clock that advances by a fixed step on every read.
///
/// A search that checks its budget once per iteration runs exactly
/// `budget / step` iterations, independent of machine speed.
#[derive(Debug, Clone)]
pub struct StepClock {
    now: Cell<u64>,
    step: u64,
}

impl StepClock {
    pub fn new(step_ms: u64) -> Self {
        Self {
            now: Cell::new(0),
            step: step_ms,
        }
    }

    /// Number of reads so far.
    pub fn reads(&self) -> u64 {
        if self.step == 0 {
            0
        } else {
            self.now.get() / self.step
        }
    }
}

impl Clock for StepClock {
    fn elapsed_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clock_advances_per_read() {
        let clock = StepClock::new(5);
        assert_eq!(clock.elapsed_ms(), 0);
        assert_eq!(clock.elapsed_ms(), 5);
        assert_eq!(clock.elapsed_ms(), 10);
        assert_eq!(clock.reads(), 3);
    }

    #[test]
    fn test_wall_clock_is_monotonic() {
        let clock = WallClock::start();
        let a = clock.elapsed_ms();
        let b = clock.elapsed_ms();
        assert!(b >= a);
    }
}
