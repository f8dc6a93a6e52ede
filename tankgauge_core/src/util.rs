//! Shared numeric guards and rounding helpers for tankgauge_core.

use crate::error::{GaugeError, Result};

/// Reject NaN and ±∞ before a value can reach stored state.
/// Returns the value unchanged when it is finite.
#[inline]
pub fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(eyre::Report::new(GaugeError::NonFinite { quantity, value }))
    }
}

/// Round to `dp` decimal places for display purposes.
/// Accounting state always keeps full precision; only presentation rounds.
#[inline]
#[must_use]
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let scale = 10f64.powi(dp as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod round_dp_tests {
    use super::round_dp;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_dp(1.25, 1), 1.3);
        assert_eq!(round_dp(-1.25, 1), -1.3);
    }

    #[test]
    fn keeps_requested_precision() {
        assert_eq!(round_dp(1263.70390, 1), 1263.7);
        assert_eq!(round_dp(0.549, 2), 0.55);
        assert_eq!(round_dp(80.44985, 1), 80.4);
    }
}
