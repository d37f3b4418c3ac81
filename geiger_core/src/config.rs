//! Compile-time constants and the few runtime knobs of the firmware loop.
//!
//! There is deliberately no file- or flag-based configuration: every
//! threshold below is a build-time constant. The `*Cfg` structs exist so the
//! runner and renderers can be exercised with different pacing in tests; all
//! defaults reproduce the constants.

use std::time::Duration;

/// Linear tube response: mR/hr per pulse in the 10-second window.
pub const TIC_FACTOR: f32 = 0.05;

/// Hardware timer tick driving the sampler.
pub const TICK_MS: u64 = 250;
/// Slots in the sliding tick window; 40 * 250 ms = one 10-second bucket.
pub const WINDOW_SLOTS: usize = 40;
/// Slots in the history ring; 50 * 10 s ~= 7 minutes.
pub const HISTORY_SLOTS: usize = 50;

/// Display refresh interval of the cooperative main loop.
pub const REFRESH_MS: u64 = 200;

/// Raw capacitive readings below this count as a touch.
pub const TOUCH_THRESHOLD: u16 = 30;
/// Consecutive reads a touch must survive to register (noise filter).
pub const TOUCH_SAMPLES: u32 = 10;
/// Spacing between those reads; 10 * 10 ms = the 100 ms debounce window.
pub const TOUCH_SAMPLE_MS: u64 = 10;
/// Minimum time between two mode flips.
pub const MODE_LOCKOUT_MS: u64 = 1_000;

/// Gauge scale ceiling handed to the percent mapping.
pub const GAUGE_MAX_PERCENT: f32 = 100.0;

/// Runner pacing and lifetime.
#[derive(Debug, Clone)]
pub struct RunCfg {
    /// Delay between display refreshes.
    pub refresh: Duration,
    /// Stop after this many frames; `None` runs until the shutdown flag.
    pub max_frames: Option<u64>,
}

impl Default for RunCfg {
    fn default() -> Self {
        Self {
            refresh: Duration::from_millis(REFRESH_MS),
            max_frames: None,
        }
    }
}

/// Needle animation tuning.
#[derive(Debug, Clone)]
pub struct GaugeCfg {
    /// Per-step delay when the needle is far from its target.
    pub sweep_min: Duration,
    /// Per-step delay ceiling reached as the needle eases into position.
    pub sweep_max: Duration,
}

impl Default for GaugeCfg {
    fn default() -> Self {
        Self {
            sweep_min: Duration::from_millis(1),
            sweep_max: Duration::from_millis(9),
        }
    }
}
