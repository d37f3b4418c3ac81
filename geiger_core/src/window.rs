//! 10-second sliding reservoir of per-tick pulse counts.

use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};

use crate::config::WINDOW_SLOTS;

/// Fixed ring of 40 per-250 ms pulse counts.
///
/// Write side belongs to the sampler tick alone; the main loop only reads.
/// Slots are individually atomic, so a `sum` racing a `store` may mix one
/// old and one new slot — tolerable jitter on a trailing average, never a
/// torn value. Zero-filled at startup: the window under-reports until the
/// index has wrapped once.
#[derive(Debug)]
pub struct TickWindow {
    slots: [AtomicU16; WINDOW_SLOTS],
    idx: AtomicUsize,
}

impl Default for TickWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl TickWindow {
    pub const fn new() -> Self {
        Self {
            slots: [const { AtomicU16::new(0) }; WINDOW_SLOTS],
            idx: AtomicUsize::new(0),
        }
    }

    /// Store `count` into the next slot and advance. Returns true when the
    /// index wrapped, i.e. a full 10-second revolution just completed.
    /// Sampler-only.
    pub fn push(&self, count: u16) -> bool {
        let i = self.idx.load(Ordering::Relaxed);
        self.slots[i].store(count, Ordering::Relaxed);
        let next = (i + 1) % WINDOW_SLOTS;
        self.idx.store(next, Ordering::Relaxed);
        next == 0
    }

    /// Sum of all 40 slots: total pulses over the trailing ~10 seconds.
    pub fn sum(&self) -> u32 {
        self.slots
            .iter()
            .map(|s| u32::from(s.load(Ordering::Relaxed)))
            .sum()
    }
}
