//! Seven-minute circular history of 10-second bucket sums.

use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};

use crate::config::HISTORY_SLOTS;

/// Fixed ring of 50 ten-second aggregates, written by the sampler every
/// 10 seconds and read by the bar-graph renderer.
///
/// The `updated` flag is a single-slot mailbox: Release-stored true on every
/// `record`, Acquire-read and cleared by the consumer after a full redraw.
/// Only the latest aggregate matters, so there is no queue. Once full, the
/// oldest entry is silently overwritten.
#[derive(Debug)]
pub struct HistoryStore {
    slots: [AtomicU16; HISTORY_SLOTS],
    idx: AtomicUsize,
    updated: AtomicBool,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub const fn new() -> Self {
        Self {
            slots: [const { AtomicU16::new(0) }; HISTORY_SLOTS],
            idx: AtomicUsize::new(0),
            updated: AtomicBool::new(false),
        }
    }

    /// Append a bucket sum, overwriting the oldest entry once full, and
    /// raise the updated flag. Sampler-only.
    pub fn record(&self, sum: u16) {
        let i = self.idx.load(Ordering::Relaxed);
        self.slots[i].store(sum, Ordering::Relaxed);
        self.idx.store((i + 1) % HISTORY_SLOTS, Ordering::Relaxed);
        self.updated.store(true, Ordering::Release);
    }

    /// Whether a bucket has been recorded since the last `clear_updated`.
    pub fn updated(&self) -> bool {
        self.updated.load(Ordering::Acquire)
    }

    /// Consumer side of the handshake; call after a full redraw.
    pub fn clear_updated(&self) {
        self.updated.store(false, Ordering::Release);
    }

    /// Lazy walk over all 50 values, most recent first. Each call starts a
    /// fresh pass, so the renderer can restart it every redraw.
    pub fn iter_newest_first(&self) -> NewestFirst<'_> {
        NewestFirst {
            store: self,
            start: self.idx.load(Ordering::Relaxed),
            yielded: 0,
        }
    }
}

/// Finite iterator over the history ring, newest to oldest.
#[derive(Debug, Clone)]
pub struct NewestFirst<'a> {
    store: &'a HistoryStore,
    /// Write position at iterator creation; newest value sits just before it.
    start: usize,
    yielded: usize,
}

impl Iterator for NewestFirst<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.yielded == HISTORY_SLOTS {
            return None;
        }
        let i = (self.start + HISTORY_SLOTS - 1 - self.yielded) % HISTORY_SLOTS;
        self.yielded += 1;
        Some(self.store.slots[i].load(Ordering::Relaxed))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = HISTORY_SLOTS - self.yielded;
        (left, Some(left))
    }
}

impl ExactSizeIterator for NewestFirst<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_after_eviction() {
        let h = HistoryStore::new();
        // 51 writes: v0 is evicted, v50..v1 remain newest-first.
        for v in 0..=HISTORY_SLOTS as u16 {
            h.record(v);
        }
        let got: Vec<u16> = h.iter_newest_first().collect();
        let want: Vec<u16> = (1..=HISTORY_SLOTS as u16).rev().collect();
        assert_eq!(got, want);
    }

    #[test]
    fn iterator_is_restartable_and_finite() {
        let h = HistoryStore::new();
        h.record(3);
        h.record(9);
        let first: Vec<u16> = h.iter_newest_first().collect();
        let second: Vec<u16> = h.iter_newest_first().collect();
        assert_eq!(first.len(), HISTORY_SLOTS);
        assert_eq!(first, second);
        assert_eq!(first[0], 9);
        assert_eq!(first[1], 3);
    }

    #[test]
    fn updated_flag_handshake() {
        let h = HistoryStore::new();
        assert!(!h.updated());
        h.record(1);
        assert!(h.updated());
        h.clear_updated();
        assert!(!h.updated());
        h.record(2);
        assert!(h.updated());
    }
}
