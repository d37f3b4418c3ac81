//! Time source behind every delay in the firmware loop.
//!
//! Three consumers pace themselves off this trait: the 250 ms sampler tick,
//! the ~200 ms display refresh, and the touch debounce / mode-flip lockout
//! arithmetic. Routing them all through one seam lets tests drive those
//! schedules with a manually-advanced clock instead of wall time.

use std::thread;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;

    /// Block (or simulate blocking) for `d`.
    fn sleep(&self, d: Duration);

    /// Whole milliseconds since `epoch`, 0 if `epoch` lies in the future.
    /// The debounce and lockout windows compare against this, so it must
    /// never go backwards for a fixed epoch.
    fn ms_since(&self, epoch: Instant) -> u64 {
        self.now().saturating_duration_since(epoch).as_millis() as u64
    }
}

/// Production clock: `Instant::now` and a real `thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    #[inline]
    fn sleep(&self, d: Duration) {
        if d.is_zero() {
            return;
        }
        thread::sleep(d);
    }
}

#[cfg(any(test, feature = "test-util"))]
pub mod test_clock {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Manually-advanced clock for deterministic timing tests.
    ///
    /// `sleep` advances the clock instead of blocking, so a debounce pass
    /// (ten 10 ms reads) or a full needle sweep costs nothing in wall time,
    /// while `ms_since` still sees the elapsed amount. Clones share the
    /// offset, letting a test advance time under code holding its own
    /// handle.
    #[derive(Debug, Clone)]
    pub struct TestClock {
        origin: Instant,
        offset: Arc<Mutex<Duration>>,
    }

    impl Default for TestClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestClock {
        pub fn new() -> Self {
            Self {
                origin: Instant::now(),
                offset: Arc::new(Mutex::new(Duration::ZERO)),
            }
        }

        /// Move time forward by `d`. Used by tests to expire the mode-flip
        /// lockout without waiting out the real second.
        pub fn advance(&self, d: Duration) {
            if let Ok(mut off) = self.offset.lock() {
                *off = off.saturating_add(d);
            }
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> Instant {
            let off = self.offset.lock().map(|g| *g).unwrap_or(Duration::ZERO);
            self.origin + off
        }

        fn sleep(&self, d: Duration) {
            self.advance(d);
        }
    }
}
