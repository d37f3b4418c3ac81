//! Test and helper mocks for geiger_core.

use std::sync::{Arc, Mutex};

use geiger_traits::{BatteryMonitor, Color, Display, HwResult, TouchPad};

/// One recorded drawing call, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
    },
    Rect {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Color,
    },
    Triangle {
        color: Color,
    },
    Text {
        x: i32,
        y: i32,
        s: String,
        color: Color,
    },
    Blit {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
    },
}

/// Display that records every primitive call for assertions.
#[derive(Debug, Default, Clone)]
pub struct RecordingDisplay {
    ops: Arc<Mutex<Vec<DrawOp>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn clear_ops(&self) {
        if let Ok(mut g) = self.ops.lock() {
            g.clear();
        }
    }

    fn push(&self, op: DrawOp) {
        if let Ok(mut g) = self.ops.lock() {
            g.push(op);
        }
    }
}

impl Display for RecordingDisplay {
    fn clear(&mut self, color: Color) -> HwResult<()> {
        self.push(DrawOp::Clear(color));
        Ok(())
    }
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> HwResult<()> {
        self.push(DrawOp::Line { x0, y0, x1, y1, color });
        Ok(())
    }
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> HwResult<()> {
        self.push(DrawOp::Rect { x, y, w, h, color });
        Ok(())
    }
    fn fill_triangle(
        &mut self,
        _x0: i32,
        _y0: i32,
        _x1: i32,
        _y1: i32,
        _x2: i32,
        _y2: i32,
        color: Color,
    ) -> HwResult<()> {
        self.push(DrawOp::Triangle { color });
        Ok(())
    }
    fn text(&mut self, x: i32, y: i32, s: &str, _size: u8, color: Color) -> HwResult<()> {
        self.push(DrawOp::Text {
            x,
            y,
            s: s.to_string(),
            color,
        });
        Ok(())
    }
    fn blit(&mut self, x: i32, y: i32, w: u32, h: u32, _bits: &[u8], _color: Color) -> HwResult<()> {
        self.push(DrawOp::Blit { x, y, w, h });
        Ok(())
    }
}

/// Touch pad that replays a fixed sequence of raw readings, then repeats the
/// last one.
#[derive(Debug, Clone)]
pub struct ScriptedTouch {
    seq: Vec<u16>,
    idx: usize,
}

impl ScriptedTouch {
    pub fn new(seq: impl Into<Vec<u16>>) -> Self {
        Self {
            seq: seq.into(),
            idx: 0,
        }
    }

    /// Pad that never reads as touched.
    pub fn idle() -> Self {
        Self::new([u16::MAX])
    }
}

impl TouchPad for ScriptedTouch {
    fn read(&mut self) -> HwResult<u16> {
        let v = if self.idx < self.seq.len() {
            let x = self.seq[self.idx];
            self.idx += 1;
            x
        } else {
            self.seq.last().copied().unwrap_or(u16::MAX)
        };
        Ok(v)
    }
}

/// Battery monitor reporting a fixed voltage.
#[derive(Debug, Clone, Copy)]
pub struct FixedBattery(pub f32);

impl BatteryMonitor for FixedBattery {
    fn read_volts(&mut self) -> HwResult<f32> {
        Ok(self.0)
    }
}

/// Battery monitor that always errors; the renderer must fold this into a
/// 0.0 V readout.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeadBattery;

impl BatteryMonitor for DeadBattery {
    fn read_volts(&mut self) -> HwResult<f32> {
        Err(Box::new(std::io::Error::other("adc unavailable")))
    }
}
