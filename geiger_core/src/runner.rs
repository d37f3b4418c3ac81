//! Cooperative main loop: touch polling, mode dispatch, display refresh.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use geiger_traits::{BatteryMonitor, Clock, Color, Display, TouchPad};

use crate::CoreState;
use crate::config::RunCfg;
use crate::error::{GeigerError, Result, map_hw_error};
use crate::estimator::ticks_to_rate;
use crate::mode::{DisplayMode, DisplayModeController};
use crate::render::{AnalogGauge, BarGraph};

/// Run the render loop until the shutdown flag is raised or the optional
/// frame budget is spent.
///
/// This is the only place that blocks: touch debounce (up to ~100 ms while
/// held), the needle sweep, and the refresh sleep all happen here, never in
/// the interrupt-side sampler. The sampler keeps filling the shared buffers
/// concurrently; this loop only reads them.
pub fn run<T, D, B>(
    state: Arc<CoreState>,
    mut touch: T,
    mut display: D,
    mut battery: B,
    clock: Arc<dyn Clock + Send + Sync>,
    shutdown: Arc<AtomicBool>,
    cfg: RunCfg,
) -> Result<()>
where
    T: TouchPad,
    D: Display,
    B: BatteryMonitor,
{
    let mut modes = DisplayModeController::new(&*clock);
    let mut gauge = AnalogGauge::default();
    let bars = BarGraph::new();

    display
        .clear(Color::Black)
        .map_err(|e| map_hw_error(GeigerError::Display, &*e))?;
    gauge.draw_static(&mut display)?;
    tracing::info!(mode = ?modes.mode(), "render loop start");

    let mut frames: u64 = 0;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            tracing::info!("shutdown requested, leaving render loop");
            return Ok(());
        }
        if let Some(max) = cfg.max_frames
            && frames >= max
        {
            tracing::debug!(frames, "frame budget spent");
            return Ok(());
        }
        frames += 1;

        if let Some(new_mode) = modes.poll(&mut touch, &*clock)? {
            // The new mode starts from a consistent full redraw: drop any
            // pending bucket signal and rebuild the static outline.
            state.history.clear_updated();
            display
                .clear(Color::Black)
                .map_err(|e| map_hw_error(GeigerError::Display, &*e))?;
            match new_mode {
                DisplayMode::Analog => gauge.draw_static(&mut display)?,
                DisplayMode::BarHistory => {
                    bars.draw_static(&mut display, &mut battery)?;
                    bars.draw_all(&mut display, &state.history)?;
                }
            }
        }

        let window_sum = state.window.sum();
        let rate = ticks_to_rate(window_sum);
        match modes.mode() {
            DisplayMode::Analog => {
                gauge.update(&mut display, rate, &*clock, &shutdown)?;
            }
            DisplayMode::BarHistory => {
                if state.history.updated() {
                    bars.draw_all(&mut display, &state.history)?;
                    state.history.clear_updated();
                }
                bars.draw_live(&mut display, window_sum)?;
            }
        }

        clock.sleep(cfg.refresh);
    }
}
