//! Screen renderers: analog needle gauge and scrolling history bar graph.
//!
//! Everything here runs on the main loop and talks to the hardware only
//! through the `Display` trait; the interrupt path never reaches this
//! module. Both visual scales derive from the same three-decade percent
//! mapping in `estimator`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use geiger_traits::{BatteryMonitor, Clock, Color, Display};

use crate::config::{GAUGE_MAX_PERCENT, GaugeCfg};
use crate::error::{GeigerError, Result, map_hw_error};
use crate::estimator::{Zone, rate_to_percent, ticks_to_rate};
use crate::history::HistoryStore;

/// Panel geometry (landscape 160x128 TFT).
pub const SCREEN_W: i32 = 160;
pub const SCREEN_H: i32 = 128;

// Gauge dial: semicircle around a pivot near the bottom edge.
const PIVOT_X: i32 = 80;
const PIVOT_Y: i32 = 112;
const DIAL_R_OUTER: i32 = 78;
const DIAL_R_INNER: i32 = 70;
const NEEDLE_LEN: i32 = 64;

// Bar graph plot area: 50 columns of 3 px pitch, right-aligned.
const BAR_PITCH: i32 = 3;
const BAR_W: u32 = 2;
const BAR_BASE_Y: i32 = 118;
const BAR_MAX_PX: f32 = 88.0;
const PLOT_RIGHT_X: i32 = 154;

impl From<Zone> for Color {
    fn from(z: Zone) -> Self {
        match z {
            Zone::Safe => Color::Green,
            Zone::Caution => Color::Orange,
            Zone::Elevated => Color::Red,
        }
    }
}

fn display_err(e: Box<dyn std::error::Error + Send + Sync>) -> eyre::Report {
    map_hw_error(GeigerError::Display, &*e)
}

/// Needle endpoint for a percent position on the 180-degree dial.
fn needle_tip(percent: i32, len: i32) -> (i32, i32) {
    let theta = (180.0 - 1.8 * percent as f32).to_radians();
    let (sin, cos) = theta.sin_cos();
    (
        PIVOT_X + (cos * len as f32) as i32,
        PIVOT_Y - (sin * len as f32) as i32,
    )
}

/// Logarithmic needle gauge over the three-decade scale.
///
/// The needle position is kept as an integer percent so each animation frame
/// moves exactly one step; the sweep eases in by stretching the per-step
/// delay as the remaining distance shrinks.
#[derive(Debug)]
pub struct AnalogGauge {
    needle: i32,
    cfg: GaugeCfg,
}

impl Default for AnalogGauge {
    fn default() -> Self {
        Self::new(GaugeCfg::default())
    }
}

impl AnalogGauge {
    pub fn new(cfg: GaugeCfg) -> Self {
        Self { needle: 0, cfg }
    }

    pub fn needle_percent(&self) -> i32 {
        self.needle
    }

    /// Draw the static dial: zone-colored arc, decade labels, unit text.
    /// Called once per mode switch; the needle is reset to zero.
    pub fn draw_static<D: Display>(&mut self, d: &mut D) -> Result<()> {
        // Arc approximated by short radial ticks, one per 2 percent.
        for p in (0..=100).step_by(2) {
            let color = Color::from(Zone::of_percent(p as f32, GAUGE_MAX_PERCENT));
            let (x0, y0) = needle_tip(p, DIAL_R_INNER);
            let (x1, y1) = needle_tip(p, DIAL_R_OUTER);
            d.line(x0, y0, x1, y1, color).map_err(display_err)?;
        }
        d.line(2, PIVOT_Y, SCREEN_W - 2, PIVOT_Y, Color::White)
            .map_err(display_err)?;
        // Decade anchors: 0.1 at 0%, 1 at a third, 10 at two thirds, 100 at top.
        for (label, p) in [("0.1", 0), ("1", 33), ("10", 67), ("100", 100)] {
            let (x, y) = needle_tip(p, DIAL_R_OUTER + 4);
            d.text(x - 6, y - 8, label, 1, Color::White)
                .map_err(display_err)?;
        }
        d.text(PIVOT_X - 18, 8, "mR/hr", 1, Color::White)
            .map_err(display_err)?;

        self.needle = 0;
        self.draw_needle(d, self.needle, Color::Red)?;
        Ok(())
    }

    /// Refresh step: print the numeric rate and sweep the needle to the
    /// percent for `rate`. Blocks for the sweep duration (bounded: at most
    /// 100 steps); `abort` is checked every step so shutdown is not delayed
    /// by a long sweep.
    pub fn update<D: Display>(
        &mut self,
        d: &mut D,
        rate: f32,
        clock: &dyn Clock,
        abort: &AtomicBool,
    ) -> Result<()> {
        let target = rate_to_percent(rate, GAUGE_MAX_PERCENT).round() as i32;
        d.fill_rect(PIVOT_X - 34, SCREEN_H - 10, 68, 10, Color::Black)
            .map_err(display_err)?;
        d.text(
            PIVOT_X - 34,
            SCREEN_H - 10,
            &format!("{rate:6.2} mR/hr"),
            1,
            Color::White,
        )
        .map_err(display_err)?;
        self.settle(d, target, clock, abort)
    }

    /// Step the needle one percent per frame until it rests on `target`.
    fn settle<D: Display>(
        &mut self,
        d: &mut D,
        target: i32,
        clock: &dyn Clock,
        abort: &AtomicBool,
    ) -> Result<()> {
        let target = target.clamp(0, 100);
        while self.needle != target {
            if abort.load(Ordering::Relaxed) {
                return Ok(());
            }
            self.draw_needle(d, self.needle, Color::Black)?;
            self.needle += if target > self.needle { 1 } else { -1 };
            self.draw_needle(d, self.needle, Color::Red)?;
            clock.sleep(self.step_delay(target));
        }
        Ok(())
    }

    /// Ease-in: constant fast delay while far out, stretching toward
    /// `sweep_max` over the last few steps before the target.
    fn step_delay(&self, target: i32) -> Duration {
        const EASE_STEPS: u32 = 8;
        let remaining = (target - self.needle).unsigned_abs().min(EASE_STEPS);
        let span = self.cfg.sweep_max.saturating_sub(self.cfg.sweep_min);
        self.cfg.sweep_min + span * (EASE_STEPS - remaining) / EASE_STEPS
    }

    fn draw_needle<D: Display>(&self, d: &mut D, percent: i32, color: Color) -> Result<()> {
        let (x, y) = needle_tip(percent, NEEDLE_LEN);
        d.line(PIVOT_X, PIVOT_Y, x, y, color).map_err(display_err)?;
        d.fill_triangle(
            PIVOT_X - 3,
            PIVOT_Y,
            PIVOT_X + 3,
            PIVOT_Y,
            PIVOT_X,
            PIVOT_Y - 6,
            color,
        )
        .map_err(display_err)?;
        Ok(())
    }
}

/// Scrolling bar graph of the 7-minute history plus the live bucket.
#[derive(Debug, Default)]
pub struct BarGraph;

impl BarGraph {
    pub fn new() -> Self {
        Self
    }

    /// Static outline: frame, baseline, title, battery readout.
    pub fn draw_static<D: Display, B: BatteryMonitor>(
        &self,
        d: &mut D,
        battery: &mut B,
    ) -> Result<()> {
        d.line(2, BAR_BASE_Y + 1, SCREEN_W - 2, BAR_BASE_Y + 1, Color::White)
            .map_err(display_err)?;
        d.text(4, 2, "7 min history", 1, Color::White)
            .map_err(display_err)?;
        // An ADC failure is indistinguishable from a flat battery on screen.
        let volts = battery.read_volts().unwrap_or(0.0);
        d.text(SCREEN_W - 44, 2, &format!("{volts:.2}V"), 1, Color::Grey)
            .map_err(display_err)?;
        Ok(())
    }

    /// Redraw every bar from the history ring, newest at the right edge.
    /// Call when the store signals updated, then clear the flag.
    pub fn draw_all<D: Display>(&self, d: &mut D, history: &HistoryStore) -> Result<()> {
        for (i, sum) in history.iter_newest_first().enumerate() {
            self.draw_bar(d, i, u32::from(sum))?;
        }
        Ok(())
    }

    /// Redraw only the rightmost column from the live running-window sum.
    pub fn draw_live<D: Display>(&self, d: &mut D, window_sum: u32) -> Result<()> {
        self.draw_bar(d, 0, window_sum)
    }

    fn draw_bar<D: Display>(&self, d: &mut D, slot: usize, sum: u32) -> Result<()> {
        let percent = rate_to_percent(ticks_to_rate(sum), GAUGE_MAX_PERCENT);
        let h = (percent / GAUGE_MAX_PERCENT * BAR_MAX_PX).round() as u32;
        let x = PLOT_RIGHT_X - BAR_PITCH * (slot as i32 + 1);
        // Erase the full column, then fill the bar from the baseline up.
        d.fill_rect(x, BAR_BASE_Y - BAR_MAX_PX as i32, BAR_W, BAR_MAX_PX as u32, Color::Black)
            .map_err(display_err)?;
        if h > 0 {
            let color = Color::from(Zone::of_percent(percent, GAUGE_MAX_PERCENT));
            d.fill_rect(x, BAR_BASE_Y - h as i32, BAR_W, h, color)
                .map_err(display_err)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needle_tip_spans_the_dial() {
        let (x0, _) = needle_tip(0, NEEDLE_LEN);
        let (x100, _) = needle_tip(100, NEEDLE_LEN);
        assert!(x0 < PIVOT_X, "0% points left");
        assert!(x100 > PIVOT_X, "100% points right");
        let (x50, y50) = needle_tip(50, NEEDLE_LEN);
        assert_eq!(x50, PIVOT_X);
        assert_eq!(y50, PIVOT_Y - NEEDLE_LEN);
    }

    #[test]
    fn step_delay_grows_near_target() {
        let g = AnalogGauge::default();
        let far = g.step_delay(100);
        let near = g.step_delay(1);
        assert!(near > far, "ease-in: {near:?} should exceed {far:?}");
        assert_eq!(far, g.cfg.sweep_min);
    }
}
