//! Real tube input: a GPIO pin pulled high, pulsed low by the detector
//! board on every count.

use std::sync::Arc;

use rppal::gpio::{Gpio, InputPin, Trigger};
use tracing::debug;

use crate::error::{HwError, Result};
use geiger_traits::PulseSink;

/// Tube connected to a GPIO pin, delivering counts through an async
/// falling-edge interrupt. The interrupt handler only calls
/// [`PulseSink::on_pulse`], which is a single atomic increment.
pub struct GpioTube {
    pin: InputPin,
}

impl GpioTube {
    pub fn new(pin: u8, sink: Arc<dyn PulseSink>) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| HwError::Gpio(e.to_string()))?;
        let mut pin = gpio
            .get(pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_input_pullup();
        pin.set_async_interrupt(Trigger::FallingEdge, move |_| {
            sink.on_pulse();
        })
        .map_err(|e| HwError::Gpio(e.to_string()))?;
        debug!(pin = pin.pin(), "tube interrupt armed");
        Ok(Self { pin })
    }

    pub fn pin(&self) -> u8 {
        self.pin.pin()
    }
}

impl Drop for GpioTube {
    fn drop(&mut self) {
        if let Err(e) = self.pin.clear_async_interrupt() {
            tracing::warn!(%e, "failed to clear tube interrupt");
        }
    }
}
