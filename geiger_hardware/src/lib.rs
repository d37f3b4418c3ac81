//! Hardware backends and host-side simulations of the tube, touch pad,
//! battery ADC and TFT panel.
//!
//! The simulated devices let the whole firmware loop run on a development
//! machine; the real GPIO tube lives behind the `hardware` feature and only
//! builds on Linux.

pub mod error;
#[cfg(all(feature = "hardware", target_os = "linux"))]
pub mod tube;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::time::Duration;

use geiger_traits::{BatteryMonitor, Color, Display, HwResult, PulseSink, TouchPad};

/// Simulated tube: a background thread delivering pulses to a [`PulseSink`]
/// at roughly the requested counts-per-minute pace, with deterministic
/// jitter so traces look like a real source rather than a metronome.
///
/// The thread is joined when the handle is dropped.
pub struct SimulatedTube {
    shutdown: Arc<AtomicBool>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl SimulatedTube {
    pub fn spawn(sink: Arc<dyn PulseSink>, cpm: u32) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let join_handle = std::thread::spawn(move || {
            let mean_us = if cpm == 0 {
                // Idle tube: nothing to emit, just wait for shutdown.
                u64::MAX
            } else {
                // Floor of 1 us keeps the jitter modulus nonzero for rates
                // above one pulse per microsecond.
                (60_000_000 / u64::from(cpm)).max(1)
            };
            let mut rng: u32 = 0x2545_F491;
            tracing::debug!(cpm, "simulated tube started");
            loop {
                if shutdown_clone.load(Ordering::Relaxed) {
                    break;
                }
                if mean_us == u64::MAX {
                    std::thread::sleep(Duration::from_millis(50));
                    continue;
                }
                // xorshift jitter: uniform in [mean/2, 3*mean/2)
                rng ^= rng << 13;
                rng ^= rng >> 17;
                rng ^= rng << 5;
                let mut wait = mean_us / 2 + u64::from(rng) % mean_us;
                // Sleep in short slices so shutdown stays prompt even at
                // very low pulse rates.
                while wait > 0 && !shutdown_clone.load(Ordering::Relaxed) {
                    let slice = wait.min(20_000);
                    std::thread::sleep(Duration::from_micros(slice));
                    wait -= slice;
                }
                if shutdown_clone.load(Ordering::Relaxed) {
                    break;
                }
                sink.on_pulse();
            }
            tracing::trace!("simulated tube thread exiting cleanly");
        });

        Self {
            shutdown,
            join_handle: Some(join_handle),
        }
    }
}

impl Drop for SimulatedTube {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.join_handle.take() {
            if let Err(e) = handle.join() {
                tracing::warn!(?e, "simulated tube thread panicked during shutdown");
            }
        }
    }
}

/// Simulated capacitive pad. The raw level is shared through a
/// [`TouchHandle`], so a test or demo driver can press and release it from
/// another thread.
pub struct SimulatedTouchPad {
    level: Arc<AtomicU16>,
}

/// Remote control for a [`SimulatedTouchPad`].
#[derive(Debug, Clone)]
pub struct TouchHandle {
    level: Arc<AtomicU16>,
}

impl TouchHandle {
    /// Drive the raw reading low, as a finger on the pad would.
    pub fn press(&self) {
        self.level.store(0, Ordering::Relaxed);
    }

    pub fn release(&self) {
        self.level.store(u16::MAX, Ordering::Relaxed);
    }
}

impl SimulatedTouchPad {
    pub fn new() -> (Self, TouchHandle) {
        let level = Arc::new(AtomicU16::new(u16::MAX));
        (
            Self {
                level: level.clone(),
            },
            TouchHandle { level },
        )
    }
}

impl TouchPad for SimulatedTouchPad {
    fn read(&mut self) -> HwResult<u16> {
        Ok(self.level.load(Ordering::Relaxed))
    }
}

/// Simulated single-cell battery: starts full and sags a little on every
/// read, bottoming out at the protection cutoff.
pub struct SimulatedBattery {
    volts: f32,
}

impl SimulatedBattery {
    pub fn new() -> Self {
        Self { volts: 4.2 }
    }
}

impl Default for SimulatedBattery {
    fn default() -> Self {
        Self::new()
    }
}

impl BatteryMonitor for SimulatedBattery {
    fn read_volts(&mut self) -> HwResult<f32> {
        let v = self.volts;
        self.volts = (self.volts - 0.01).max(3.3);
        Ok(v)
    }
}

/// Display backend that traces every primitive instead of driving a panel.
/// Useful when running the loop headless on a development machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleDisplay;

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl Display for ConsoleDisplay {
    fn clear(&mut self, color: Color) -> HwResult<()> {
        tracing::trace!(?color, "clear");
        Ok(())
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> HwResult<()> {
        tracing::trace!(x0, y0, x1, y1, ?color, "line");
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> HwResult<()> {
        tracing::trace!(x, y, w, h, ?color, "fill_rect");
        Ok(())
    }

    fn fill_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) -> HwResult<()> {
        tracing::trace!(x0, y0, x1, y1, x2, y2, ?color, "fill_triangle");
        Ok(())
    }

    fn text(&mut self, x: i32, y: i32, s: &str, size: u8, color: Color) -> HwResult<()> {
        tracing::trace!(x, y, s, size, ?color, "text");
        Ok(())
    }

    fn blit(&mut self, x: i32, y: i32, w: u32, h: u32, _bits: &[u8], color: Color) -> HwResult<()> {
        tracing::trace!(x, y, w, h, ?color, "blit");
        Ok(())
    }
}
