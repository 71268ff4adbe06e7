//! Time sources for the scheduler
//!
//! The scheduler never reads the system clock directly. It asks a
//! [`TimeSource`] for the current time in seconds, so hosts can drive it
//! from a real monotonic clock or from a manually advanced one.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic source of elapsed seconds since an arbitrary epoch
pub trait TimeSource {
    /// Current time in seconds
    fn now(&self) -> f64;
}

impl<F> TimeSource for F
where
    F: Fn() -> f64,
{
    fn now(&self) -> f64 {
        self()
    }
}

/// Seconds elapsed since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Manually advanced clock.
///
/// Clones share the same underlying time, so a test can hand one clone to
/// the scheduler and keep another to move time forward.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock at `start` seconds
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, ts: f64) {
        debug_assert!(ts >= self.now.get(), "ManualClock must not go backwards");
        self.now.set(ts);
    }

    /// Move forward by `dt` seconds
    pub fn advance(&self, dt: f64) {
        debug_assert!(dt >= 0.0);
        self.now.set(self.now.get() + dt);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
