#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Geiger-counter estimation core (hardware-agnostic).
//!
//! Turns tube pulse counts into a displayed dose rate. All hardware
//! interactions go through the `geiger_traits` collaborators.
//!
//! ## Architecture
//!
//! - **Counting**: interrupt-side pulse counter (`counter` module)
//! - **Sampling**: 250 ms tick filling the 10-second window and rolling
//!   10-second buckets into the history ring (`sampler`, `window`,
//!   `history`)
//! - **Estimation**: linear tube response and the three-decade log percent
//!   scale (`estimator`)
//! - **Mode**: debounced touch toggle between the two views (`mode`)
//! - **Rendering**: analog needle gauge and history bar graph (`render`)
//! - **Loop**: cooperative main loop tying it together (`runner`)
//!
//! ## Concurrency
//!
//! Shared state is the [`CoreState`] struct: every field is written by
//! exactly one side (pulse interrupt owns the counter, the sampler tick
//! owns both rings) and read by the main loop. All accesses are
//! atomic-width; there are no locks. The only cross-side ordering that
//! matters is the history updated flag, which uses Release/Acquire as a
//! single-slot mailbox.

pub mod config;
pub mod counter;
pub mod error;
pub mod estimator;
pub mod history;
pub mod mocks;
pub mod mode;
pub mod render;
pub mod runner;
pub mod sampler;
pub mod window;

pub use config::{GaugeCfg, RunCfg, TIC_FACTOR};
pub use counter::PulseCounter;
pub use error::GeigerError;
pub use estimator::{Zone, rate_to_percent, ticks_to_rate};
pub use history::HistoryStore;
pub use mode::{DisplayMode, DisplayModeController};
pub use render::{AnalogGauge, BarGraph};
pub use sampler::{PeriodicSampler, TickDriver};
pub use window::TickWindow;

/// All state shared between interrupt context and the main loop.
///
/// Write ownership is split per field: the tube interrupt increments
/// `pulses`, the sampler tick writes `window` and `history`, and the main
/// loop only reads. Constructed once and shared via `Arc`.
#[derive(Debug, Default)]
pub struct CoreState {
    pub pulses: PulseCounter,
    pub window: TickWindow,
    pub history: HistoryStore,
}

impl CoreState {
    pub const fn new() -> Self {
        Self {
            pulses: PulseCounter::new(),
            window: TickWindow::new(),
            history: HistoryStore::new(),
        }
    }
}

/// Pulse sources take the whole state handle and land on the counter.
impl geiger_traits::PulseSink for CoreState {
    fn on_pulse(&self) {
        self.pulses.on_pulse();
    }
}
