//! Interrupt-side pulse counter.

use std::sync::atomic::{AtomicU16, Ordering};

use geiger_traits::PulseSink;

/// Shared pulse counter between the tube edge interrupt (write side) and the
/// periodic sampler (read-and-reset side).
///
/// `on_pulse` is the only writer besides the sampler's `take`; the swap in
/// `take` makes the read-then-zero a single atomic operation, so a pulse
/// landing during the 250 ms rollover is attributed to the next interval
/// rather than lost or double-counted. The counter is 16-bit and wraps on
/// overflow; realistic dose rates stay far below that.
#[derive(Debug, Default)]
pub struct PulseCounter {
    count: AtomicU16,
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self {
            count: AtomicU16::new(0),
        }
    }

    /// Pulses accumulated since the last `take`, without resetting.
    pub fn peek(&self) -> u16 {
        self.count.load(Ordering::Relaxed)
    }

    /// Atomically read and zero the counter. Sampler-only.
    pub fn take(&self) -> u16 {
        self.count.swap(0, Ordering::Relaxed)
    }
}

impl PulseSink for PulseCounter {
    /// Invoked from interrupt context on each tube pulse. Wrapping add, no
    /// bounds check, no blocking.
    fn on_pulse(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}
