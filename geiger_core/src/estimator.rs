//! Pure dose-rate math shared by both visual scales.

use crate::config::TIC_FACTOR;

/// Linear tube response: pulses in the trailing 10-second window to mR/hr.
#[inline]
pub fn ticks_to_rate(ticks: u32) -> f32 {
    ticks as f32 * TIC_FACTOR
}

/// Map a dose rate onto a bounded logarithmic scale of `0..=max_percent`
/// spanning three decades (0.1, 1, 10, 100 mR/hr).
///
/// Rates at or below zero (NaN included) map to 0. Otherwise
/// `percent = (max_percent / 3) * (log10(rate) + 1)`, clamped to the scale:
/// 0.1 sits at 0%, 1 at a third, 10 at two thirds, 100 at the top.
#[inline]
pub fn rate_to_percent(rate: f32, max_percent: f32) -> f32 {
    if rate.is_nan() || rate <= 0.0 {
        return 0.0;
    }
    let pct = (max_percent / 3.0) * (rate.log10() + 1.0);
    pct.clamp(0.0, max_percent)
}

/// Color band of the three-decade scale. The bottom third is safe, the
/// middle third caution, the top third elevated; gauge arc and bar colors
/// both derive from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Safe,
    Caution,
    Elevated,
}

impl Zone {
    pub fn of_percent(percent: f32, max_percent: f32) -> Self {
        if percent < max_percent / 3.0 {
            Zone::Safe
        } else if percent < 2.0 * max_percent / 3.0 {
            Zone::Caution
        } else {
            Zone::Elevated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn rate_is_linear_in_ticks() {
        assert_eq!(ticks_to_rate(0), 0.0);
        assert!((ticks_to_rate(80) - 4.0).abs() < 1e-6);
        assert!((ticks_to_rate(20) - 1.0).abs() < 1e-6);
    }

    #[rstest]
    #[case(0.1, 0.0)]
    #[case(1.0, 33.3)]
    #[case(10.0, 66.7)]
    #[case(100.0, 100.0)]
    fn decade_anchors(#[case] rate: f32, #[case] want: f32) {
        let got = rate_to_percent(rate, 100.0);
        assert!((got - want).abs() <= 1.0, "rate {rate} -> {got}, want ~{want}");
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f32::NEG_INFINITY)]
    #[case(f32::NAN)]
    fn nonpositive_rates_pin_to_zero(#[case] rate: f32) {
        assert_eq!(rate_to_percent(rate, 100.0), 0.0);
    }

    #[test]
    fn clamps_above_top_decade() {
        assert_eq!(rate_to_percent(1_000.0, 100.0), 100.0);
        assert_eq!(rate_to_percent(f32::INFINITY, 100.0), 100.0);
        assert_eq!(rate_to_percent(250.0, 60.0), 60.0);
    }

    #[test]
    fn below_bottom_decade_clamps_to_zero() {
        assert_eq!(rate_to_percent(0.01, 100.0), 0.0);
    }

    #[test]
    fn zones_split_in_thirds() {
        assert_eq!(Zone::of_percent(0.0, 100.0), Zone::Safe);
        assert_eq!(Zone::of_percent(33.0, 100.0), Zone::Safe);
        assert_eq!(Zone::of_percent(34.0, 100.0), Zone::Caution);
        assert_eq!(Zone::of_percent(66.0, 100.0), Zone::Caution);
        assert_eq!(Zone::of_percent(67.0, 100.0), Zone::Elevated);
        assert_eq!(Zone::of_percent(100.0, 100.0), Zone::Elevated);
    }
}
