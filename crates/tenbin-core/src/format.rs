//! Display formatting for metric values.
//!
//! Both formatters take a nullable value and never fail: a missing or
//! non-finite input renders as [`MISSING_SENTINEL`].
//!
//! # Rounding
//!
//! Values are converted to a [`Decimal`] through their shortest round-trip
//! decimal representation (so `2.005_f64` is treated as `2.005`, not as the
//! nearest binary fraction) and then rounded half-to-even
//! ([`RoundingStrategy::MidpointNearestEven`]):
//!
//! | call | output |
//! | --- | --- |
//! | `format_number(Some(2.005), 2)` | `"2.00"` |
//! | `format_number(Some(2.015), 2)` | `"2.02"` |
//! | `format_percent(Some(0.005), 0)` | `"0%"` |
//! | `format_percent(Some(0.015), 0)` | `"2%"` |
//!
//! Percent scaling happens in decimal arithmetic, so `0.1234` becomes exactly
//! `12.34` before rounding.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Text shown in place of a missing value.
pub const MISSING_SENTINEL: &str = "N/A";

/// Formats a fraction as a percentage (`0.1234` with 2 decimals → `"12.34%"`).
pub fn format_percent(value: Option<f64>, decimals: u32) -> String {
    match value.filter(|v| v.is_finite()) {
        None => MISSING_SENTINEL.to_string(),
        Some(v) => match to_decimal(v).and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED)) {
            Some(d) => format!("{}%", render_decimal(d, decimals)),
            None => format!("{:.*}%", decimals as usize, v * 100.0),
        },
    }
}

/// Formats a number with a fixed count of decimals and no suffix.
pub fn format_number(value: Option<f64>, decimals: u32) -> String {
    match value.filter(|v| v.is_finite()) {
        None => MISSING_SENTINEL.to_string(),
        Some(v) => match to_decimal(v) {
            Some(d) => render_decimal(d, decimals),
            None => format!("{:.*}", decimals as usize, v),
        },
    }
}

/// Shortest round-trip conversion; `None` when outside the Decimal range.
fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string()).ok()
}

fn render_decimal(value: Decimal, decimals: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    format!("{:.*}", decimals as usize, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_basic() {
        assert_eq!(format_percent(Some(0.1234), 2), "12.34%");
        assert_eq!(format_percent(Some(0.5), 0), "50%");
        assert_eq!(format_percent(Some(0.5), 1), "50.0%");
        assert_eq!(format_percent(Some(1.25), 0), "125%");
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(format_percent(None, 2), "N/A");
        assert_eq!(format_number(None, 0), "N/A");
        assert_eq!(format_number(Some(f64::NAN), 2), "N/A");
        assert_eq!(format_percent(Some(f64::INFINITY), 2), "N/A");
    }

    #[test]
    fn test_half_to_even() {
        assert_eq!(format_number(Some(2.005), 2), "2.00");
        assert_eq!(format_number(Some(2.015), 2), "2.02");
        assert_eq!(format_number(Some(0.5), 0), "0");
        assert_eq!(format_number(Some(1.5), 0), "2");
        assert_eq!(format_number(Some(2.5), 0), "2");
        assert_eq!(format_percent(Some(0.005), 0), "0%");
        assert_eq!(format_percent(Some(0.015), 0), "2%");
    }

    #[test]
    fn test_repeatable() {
        let first = format_number(Some(2.005), 2);
        for _ in 0..10 {
            assert_eq!(format_number(Some(2.005), 2), first);
        }
    }

    #[test]
    fn test_padding_and_sign() {
        assert_eq!(format_number(Some(0.52), 3), "0.520");
        assert_eq!(format_number(Some(7.0), 2), "7.00");
        assert_eq!(format_number(Some(-0.001), 2), "0.00");
        assert_eq!(format_number(Some(-1.234), 1), "-1.2");
    }

    #[test]
    fn test_render_decimal_exact() {
        assert_eq!(render_decimal(dec!(2.345), 2), "2.34");
        assert_eq!(render_decimal(dec!(2.355), 2), "2.36");
        assert_eq!(render_decimal(dec!(-0.004), 2), "0.00");
        assert_eq!(render_decimal(dec!(12), 1), "12.0");
    }

    #[test]
    fn test_out_of_decimal_range() {
        let text = format_number(Some(1e30), 0);
        assert!(text.starts_with("1000000000000000019884624838656"));
    }

    #[test]
    fn test_percent_overflow_after_scaling() {
        // Fits in a Decimal, but not once multiplied by 100.
        assert_eq!(format_percent(Some(1e27), 0), "100000000000000009025336901632%");
        assert_eq!(
            format_percent(Some(-1e27), 2),
            "-100000000000000009025336901632.00%"
        );
    }

    proptest! {
        #[test]
        fn prop_number_within_half_unit(v in -1.0e6f64..1.0e6, decimals in 0u32..5) {
            let text = format_number(Some(v), decimals);
            let parsed: f64 = text.parse().unwrap();
            let half_unit = 0.5 * 10f64.powi(-(decimals as i32));
            prop_assert!((parsed - v).abs() <= half_unit + 1e-9);
        }

        #[test]
        fn prop_percent_has_suffix(v in -10.0f64..10.0, decimals in 0u32..4) {
            let text = format_percent(Some(v), decimals);
            prop_assert!(text.ends_with('%'));
            let digits = text.trim_end_matches('%');
            match digits.split_once('.') {
                Some((_, frac)) => prop_assert_eq!(frac.len(), decimals as usize),
                None => prop_assert_eq!(decimals, 0),
            }
        }
    }
}
