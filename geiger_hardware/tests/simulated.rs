//! Behavior of the simulated devices that stand in for the real board.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use geiger_hardware::{SimulatedBattery, SimulatedTouchPad, SimulatedTube};
use geiger_traits::{BatteryMonitor, PulseSink, TouchPad};
use rstest::rstest;

#[derive(Default)]
struct CountingSink(AtomicU32);

impl PulseSink for CountingSink {
    fn on_pulse(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn tube_delivers_pulses_at_roughly_the_requested_pace() {
    let sink = Arc::new(CountingSink::default());
    // 6000 cpm = 100 pulses/s, so ~30 pulses in 300 ms.
    let tube = SimulatedTube::spawn(sink.clone(), 6_000);
    std::thread::sleep(Duration::from_millis(300));
    drop(tube);

    let n = sink.0.load(Ordering::Relaxed);
    // Wide band: jitter and scheduler noise, but clearly non-zero and
    // nowhere near an unjittered burst.
    assert!((5..=90).contains(&n), "got {n} pulses in 300ms");
}

#[test]
fn extreme_rates_clamp_the_interval_instead_of_panicking() {
    let sink = Arc::new(CountingSink::default());
    // Above one pulse per microsecond the nominal interval rounds to zero;
    // the tube must keep emitting rather than kill its thread.
    let tube = SimulatedTube::spawn(sink.clone(), 100_000_000);
    std::thread::sleep(Duration::from_millis(50));
    drop(tube);
    assert!(sink.0.load(Ordering::Relaxed) > 0, "tube thread died");
}

#[test]
fn idle_tube_emits_nothing_and_still_shuts_down() {
    let sink = Arc::new(CountingSink::default());
    let tube = SimulatedTube::spawn(sink.clone(), 0);
    std::thread::sleep(Duration::from_millis(120));
    drop(tube);
    assert_eq!(sink.0.load(Ordering::Relaxed), 0);
}

#[test]
fn tube_shutdown_is_prompt_even_at_low_rates() {
    let sink = Arc::new(CountingSink::default());
    // 2 cpm: mean interval of 30 seconds.
    let tube = SimulatedTube::spawn(sink, 2);
    std::thread::sleep(Duration::from_millis(50));

    let start = std::time::Instant::now();
    drop(tube);
    assert!(
        start.elapsed() < Duration::from_millis(200),
        "drop blocked on a long pulse interval"
    );
}

#[rstest]
#[case(false, u16::MAX)]
#[case(true, 0)]
fn touch_pad_follows_its_handle(#[case] pressed: bool, #[case] want: u16) {
    let (mut pad, handle) = SimulatedTouchPad::new();
    if pressed {
        handle.press();
    } else {
        handle.release();
    }
    assert_eq!(pad.read().unwrap(), want);
}

#[test]
fn battery_sags_but_never_below_cutoff() {
    let mut batt = SimulatedBattery::new();
    let first = batt.read_volts().unwrap();
    assert!((first - 4.2).abs() < 1e-6);

    let mut last = first;
    for _ in 0..200 {
        let v = batt.read_volts().unwrap();
        assert!(v <= last);
        last = v;
    }
    assert!((last - 3.3).abs() < 1e-6, "sagged to cutoff, got {last}");
}
