//! Periodic 250 ms sampling: counter rollover, window fill, bucket roll-up.
//!
//! `PeriodicSampler::on_tick` is the timer-interrupt body and must stay
//! short, non-blocking, and free of I/O or logging. `TickDriver` is the
//! host-side stand-in for the hardware timer: one thread that fires the tick
//! at a fixed period and is joined when the driver is dropped, so driver
//! instances never leak threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use geiger_traits::clock::Clock;

use crate::CoreState;
use crate::config::TICK_MS;

/// Owner of the tick-side write path over the shared core state.
#[derive(Debug, Clone)]
pub struct PeriodicSampler {
    state: Arc<CoreState>,
}

impl PeriodicSampler {
    pub fn new(state: Arc<CoreState>) -> Self {
        Self { state }
    }

    /// One 250 ms timer tick, interrupt context:
    /// 1. swap the pulse counter to zero and store it into the next window
    ///    slot;
    /// 2. when the window index wraps (10 s elapsed), sum the 40 slots and
    ///    record the bucket into the history ring, raising the updated flag.
    pub fn on_tick(&self) {
        let pulses = self.state.pulses.take();
        let wrapped = self.state.window.push(pulses);
        if wrapped {
            let sum = self.state.window.sum();
            // Clips rather than wraps at out-of-envelope rates, so the bar
            // graph saturates instead of folding back to zero.
            self.state.history.record(sum.min(u32::from(u16::MAX)) as u16);
        }
    }
}

/// Thread-backed 250 ms tick source.
///
/// Safety: each `TickDriver` spawns exactly one thread that is shut down
/// when the driver is dropped.
pub struct TickDriver {
    shutdown: Arc<AtomicBool>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl TickDriver {
    /// Spawn the tick thread. `period` defaults to [`TICK_MS`] via
    /// [`TickDriver::spawn_default`]; tests shorten it to keep runtimes low.
    pub fn spawn<C: Clock + Send + Sync + 'static>(
        sampler: PeriodicSampler,
        period: Duration,
        clock: C,
    ) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let join_handle = std::thread::spawn(move || {
            loop {
                if shutdown_clone.load(Ordering::Relaxed) {
                    tracing::debug!("tick driver received shutdown signal");
                    break;
                }
                clock.sleep(period);
                // Check again so a shutdown during the sleep skips the tick.
                if shutdown_clone.load(Ordering::Relaxed) {
                    break;
                }
                sampler.on_tick();
            }
            tracing::trace!("tick driver thread exiting cleanly");
        });

        Self {
            shutdown,
            join_handle: Some(join_handle),
        }
    }

    pub fn spawn_default<C: Clock + Send + Sync + 'static>(
        sampler: PeriodicSampler,
        clock: C,
    ) -> Self {
        Self::spawn(sampler, Duration::from_millis(TICK_MS), clock)
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("tick driver thread joined successfully");
                }
                Err(e) => {
                    // Thread panicked; log but don't propagate (we're in Drop)
                    tracing::warn!(?e, "tick driver thread panicked during shutdown");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WINDOW_SLOTS;
    use geiger_traits::PulseSink;

    #[test]
    fn bucket_recorded_exactly_once_on_fortieth_tick() {
        let state = Arc::new(CoreState::new());
        let sampler = PeriodicSampler::new(Arc::clone(&state));

        // Counts c0..c39, two pulses short of wrap never records.
        let counts: Vec<u16> = (0..WINDOW_SLOTS as u16).collect();
        for &c in &counts[..WINDOW_SLOTS - 1] {
            for _ in 0..c {
                state.pulses.on_pulse();
            }
            sampler.on_tick();
            assert!(!state.history.updated());
        }
        for _ in 0..counts[WINDOW_SLOTS - 1] {
            state.pulses.on_pulse();
        }
        sampler.on_tick();

        let expect: u32 = counts.iter().map(|&c| u32::from(c)).sum();
        assert!(state.history.updated());
        assert_eq!(state.window.sum(), expect);
        let newest = state
            .history
            .iter_newest_first()
            .next()
            .expect("history yields values");
        assert_eq!(u32::from(newest), expect);
        // Exactly one bucket written: the rest of the ring is untouched.
        assert_eq!(
            state.history.iter_newest_first().skip(1).map(u32::from).sum::<u32>(),
            0
        );
    }

    #[test]
    fn tick_consumes_pending_pulses() {
        let state = Arc::new(CoreState::new());
        let sampler = PeriodicSampler::new(Arc::clone(&state));
        for _ in 0..5 {
            state.pulses.on_pulse();
        }
        sampler.on_tick();
        assert_eq!(state.pulses.peek(), 0);
        assert_eq!(state.window.sum(), 5);
    }

    #[test]
    fn bucket_sum_clips_at_u16_max() {
        let state = Arc::new(CoreState::new());
        let sampler = PeriodicSampler::new(Arc::clone(&state));
        // Every slot near the u16 ceiling; the 40-slot sum far exceeds it.
        for _ in 0..WINDOW_SLOTS {
            for _ in 0..10_000 {
                state.pulses.on_pulse();
            }
            sampler.on_tick();
        }
        let newest = state.history.iter_newest_first().next().unwrap();
        assert_eq!(newest, u16::MAX);
    }
}
