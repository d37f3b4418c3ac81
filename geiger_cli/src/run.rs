//! Wiring of the board around the core render loop: pulse source, tick
//! driver, touch pad, battery and display. The tube is the real GPIO
//! interrupt on hardware builds and a paced thread otherwise; the remaining
//! peripherals are simulated on the host either way.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use eyre::Result;

use geiger_core::config::{GAUGE_MAX_PERCENT, REFRESH_MS, RunCfg};
use geiger_core::sampler::{PeriodicSampler, TickDriver};
use geiger_core::{CoreState, rate_to_percent, ticks_to_rate};
use geiger_hardware::{
    ConsoleDisplay, SimulatedBattery, SimulatedTouchPad, SimulatedTube, TouchHandle,
};
use geiger_traits::clock::MonotonicClock;
use geiger_traits::{BatteryMonitor, Clock, PulseSink, TouchPad};

pub fn run(
    cpm: u32,
    tube_pin: u8,
    seconds: Option<u64>,
    flip_every: Option<u64>,
    shutdown: Arc<AtomicBool>,
) -> Result<()> {
    let state = Arc::new(CoreState::new());

    // Pulse source: the real tube interrupt on hardware builds, a paced
    // thread everywhere else.
    #[cfg(all(feature = "hardware", target_os = "linux"))]
    let _tube = {
        let _ = cpm;
        geiger_hardware::tube::GpioTube::new(tube_pin, Arc::clone(&state) as Arc<dyn PulseSink>)?
    };
    #[cfg(not(all(feature = "hardware", target_os = "linux")))]
    let _tube = {
        let _ = tube_pin;
        SimulatedTube::spawn(Arc::clone(&state) as Arc<dyn PulseSink>, cpm)
    };
    let _ticks = TickDriver::spawn_default(
        PeriodicSampler::new(Arc::clone(&state)),
        MonotonicClock::new(),
    );

    let (touch, touch_handle) = SimulatedTouchPad::new();
    let presser = flip_every.map(|secs| spawn_presser(touch_handle, secs, Arc::clone(&shutdown)));

    let cfg = RunCfg {
        max_frames: seconds.map(frame_budget),
        ..RunCfg::default()
    };
    tracing::info!(?seconds, "starting run loop");

    let result = geiger_core::runner::run(
        Arc::clone(&state),
        touch,
        ConsoleDisplay::new(),
        SimulatedBattery::new(),
        Arc::new(MonotonicClock::new()),
        Arc::clone(&shutdown),
        cfg,
    );

    shutdown.store(true, Ordering::Relaxed);
    if let Some(handle) = presser {
        let _ = handle.join();
    }
    result?;

    let sum = state.window.sum();
    let rate = ticks_to_rate(sum);
    let percent = rate_to_percent(rate, GAUGE_MAX_PERCENT);
    println!("final reading: {rate:.2} mR/hr ({percent:.0}% of scale, {sum} counts in window)");
    Ok(())
}

/// Frames covering roughly `seconds` of runtime. The loop adds sweep time
/// on top of the refresh delay, so this is only an approximate duration;
/// saturates instead of wrapping for absurd inputs.
fn frame_budget(seconds: u64) -> u64 {
    seconds.max(1).saturating_mul(1_000) / REFRESH_MS
}

/// Hold the pad for 150 ms every `secs` seconds, long enough to clear the
/// 100 ms debounce.
fn spawn_presser(
    handle: TouchHandle,
    secs: u64,
    shutdown: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let period = Duration::from_secs(secs.max(1));
        loop {
            let mut waited = Duration::ZERO;
            while waited < period {
                if shutdown.load(Ordering::Relaxed) {
                    return;
                }
                std::thread::sleep(Duration::from_millis(50));
                waited += Duration::from_millis(50);
            }
            tracing::debug!("pressing simulated touch pad");
            handle.press();
            std::thread::sleep(Duration::from_millis(150));
            handle.release();
        }
    })
}

/// Touch one of each simulated device and report what came back.
pub fn self_check() -> Result<()> {
    let state = Arc::new(CoreState::new());
    let tube = SimulatedTube::spawn(Arc::clone(&state) as Arc<dyn PulseSink>, 6_000);
    MonotonicClock::new().sleep(Duration::from_millis(300));
    drop(tube);
    let pulses = state.pulses.peek();
    println!("tube: {pulses} pulses in 300 ms at 6000 cpm");

    let (mut pad, handle) = SimulatedTouchPad::new();
    let idle = pad.read().map_err(|e| eyre::eyre!(e))?;
    handle.press();
    let pressed = pad.read().map_err(|e| eyre::eyre!(e))?;
    println!("touch: idle raw {idle}, pressed raw {pressed}");

    let mut battery = SimulatedBattery::new();
    let volts = battery.read_volts().map_err(|e| eyre::eyre!(e))?;
    println!("battery: {volts:.2}V");

    if pulses == 0 {
        eyre::bail!("simulated tube produced no pulses");
    }
    println!("self-check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_budget_is_five_frames_per_second() {
        assert_eq!(frame_budget(1), 5);
        assert_eq!(frame_budget(60), 300);
    }

    #[test]
    fn frame_budget_saturates_on_huge_durations() {
        // Wrapping here would yield a tiny budget and an instant exit.
        assert_eq!(frame_budget(u64::MAX), u64::MAX / REFRESH_MS);
        assert!(frame_budget(u64::MAX) > frame_budget(1));
    }

    #[test]
    fn zero_seconds_still_renders_at_least_one_second() {
        assert_eq!(frame_budget(0), frame_budget(1));
    }
}
