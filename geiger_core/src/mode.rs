//! Touch-driven display mode state machine.

use std::time::Instant;

use geiger_traits::{Clock, TouchPad};

use crate::config::{MODE_LOCKOUT_MS, TOUCH_SAMPLES, TOUCH_SAMPLE_MS, TOUCH_THRESHOLD};
use crate::error::{GeigerError, Result, map_hw_error};

/// Which visualization owns the screen. The mode is the sole discriminant:
/// there is no other render state to reconcile on a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Analog,
    BarHistory,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Analog => DisplayMode::BarHistory,
            DisplayMode::BarHistory => DisplayMode::Analog,
        }
    }
}

/// Debounced mode toggle.
///
/// A poll takes ten 10 ms-spaced raw reads; all of them must sit below
/// [`TOUCH_THRESHOLD`] (a sustained >=100 ms touch) to register, so a single
/// noisy read never flips the mode. A registered touch is then gated by the
/// one-second lockout since the previous flip.
#[derive(Debug)]
pub struct DisplayModeController {
    mode: DisplayMode,
    epoch: Instant,
    last_flip_ms: Option<u64>,
}

impl DisplayModeController {
    pub fn new(clock: &dyn Clock) -> Self {
        Self {
            mode: DisplayMode::default(),
            epoch: clock.now(),
            last_flip_ms: None,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Sample the pad and apply the transition rule. Returns the new mode
    /// when a flip happened, `None` otherwise. Blocks for up to ~100 ms
    /// while a touch is held; returns immediately on the first clean read.
    pub fn poll<T: TouchPad>(&mut self, touch: &mut T, clock: &dyn Clock) -> Result<Option<DisplayMode>> {
        for _ in 0..TOUCH_SAMPLES {
            let raw = touch
                .read()
                .map_err(|e| map_hw_error(GeigerError::Touch, &*e))?;
            if raw >= TOUCH_THRESHOLD {
                return Ok(None);
            }
            clock.sleep(std::time::Duration::from_millis(TOUCH_SAMPLE_MS));
        }

        let now = clock.ms_since(self.epoch);
        if let Some(last) = self.last_flip_ms
            && now.saturating_sub(last) < MODE_LOCKOUT_MS
        {
            tracing::trace!(now, last, "mode flip suppressed by lockout");
            return Ok(None);
        }

        self.mode = self.mode.toggled();
        self.last_flip_ms = Some(now);
        tracing::debug!(mode = ?self.mode, "display mode flipped");
        Ok(Some(self.mode))
    }
}
