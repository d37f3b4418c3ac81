pub mod clock;

pub use clock::{Clock, MonotonicClock};

use std::error::Error;

/// Boxed error type shared by all hardware collaborators.
pub type HwResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Pulse-edge interrupt handler.
///
/// Implementations must be non-blocking, allocation-free, and safe to call
/// from any thread: the tube driver invokes `on_pulse` from interrupt (or
/// interrupt-stand-in) context while the main loop is running.
pub trait PulseSink: Send + Sync {
    fn on_pulse(&self);
}

/// Capacitive touch pad. Lower raw readings mean a firmer touch; a pad is
/// considered pressed while the reading stays below a fixed threshold.
pub trait TouchPad {
    fn read(&mut self) -> HwResult<u16>;
}

/// Battery voltage sensed through a resistor divider on an analog pin.
pub trait BatteryMonitor {
    fn read_volts(&mut self) -> HwResult<f32>;
}

/// Display palette. Concrete drivers map these onto whatever pixel format
/// the panel wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Grey,
    Green,
    Orange,
    Red,
}

/// Drawing primitives of the display collaborator.
///
/// The estimation core never touches pixels directly; renderers hand these
/// methods percent/rate-derived coordinates and nothing else.
pub trait Display {
    /// Clear the whole screen to `color`.
    fn clear(&mut self, color: Color) -> HwResult<()>;
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> HwResult<()>;
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> HwResult<()>;
    fn fill_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) -> HwResult<()>;
    fn text(&mut self, x: i32, y: i32, s: &str, size: u8, color: Color) -> HwResult<()>;
    /// Blit a 1-bit image (row-major, MSB first) at the given position.
    fn blit(&mut self, x: i32, y: i32, w: u32, h: u32, bits: &[u8], color: Color) -> HwResult<()>;
}
