//! Horizontal-cylinder tank geometry and the circular-segment level model.
//!
//! The sensor sits at the top of the tank and reports the distance down to
//! the oil surface, so a small reading means a full tank. Conversion to
//! litres goes through the cross-sectional area of the circular segment
//! below the surface; everything here is pure and deterministic.

use std::f64::consts::PI;

use crate::error::{BuildError, Result};

/// Level derived from a single depth reading: litres in the tank and the
/// share of the full tank they represent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    pub volume_litres: f64,
    /// In `[0, 100]`.
    pub fill_percent: f64,
}

/// Fixed dimensions of a horizontal cylindrical tank, in centimetres.
///
/// Validated once at construction and immutable afterwards; changing the
/// tank means building a new value, not mutating this one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankGeometry {
    diameter_cm: f64,
    length_cm: f64,
}

impl TankGeometry {
    /// Both dimensions must be finite and strictly positive.
    pub fn new(diameter_cm: f64, length_cm: f64) -> Result<Self> {
        if !diameter_cm.is_finite() || diameter_cm <= 0.0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "tank diameter must be a positive, finite number of centimetres",
            )));
        }
        if !length_cm.is_finite() || length_cm <= 0.0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "tank length must be a positive, finite number of centimetres",
            )));
        }
        Ok(Self {
            diameter_cm,
            length_cm,
        })
    }

    #[inline]
    #[must_use]
    pub fn diameter_cm(&self) -> f64 {
        self.diameter_cm
    }

    #[inline]
    #[must_use]
    pub fn length_cm(&self) -> f64 {
        self.length_cm
    }

    #[inline]
    fn radius_cm(&self) -> f64 {
        self.diameter_cm / 2.0
    }

    /// Volume of the completely full tank, in litres.
    #[must_use]
    pub fn max_volume_litres(&self) -> f64 {
        let r = self.radius_cm();
        PI * r * r * self.length_cm / 1000.0
    }

    /// Height of oil above the tank floor for a sensor distance reading,
    /// clamped to `[0, diameter]`. A reading past the diameter means empty,
    /// a negative reading means brim full.
    #[must_use]
    pub fn oil_depth_cm(&self, sensor_distance_cm: f64) -> f64 {
        (self.diameter_cm - sensor_distance_cm).clamp(0.0, self.diameter_cm)
    }

    /// Level for one sensor distance reading.
    ///
    /// Out-of-range readings clamp rather than fail: sensor noise around the
    /// physical limits must degrade gracefully, never produce a negative
    /// volume or a fill percentage outside `[0, 100]`. For any finite input
    /// both outputs are finite.
    #[must_use]
    pub fn level_at(&self, sensor_distance_cm: f64) -> Level {
        let max = self.max_volume_litres();
        // Degenerate dimensions can round the max volume all the way to
        // zero; report empty instead of dividing by it.
        if max <= 0.0 {
            return Level {
                volume_litres: 0.0,
                fill_percent: 0.0,
            };
        }
        let volume_litres = self.segment_volume_litres(self.oil_depth_cm(sensor_distance_cm));
        let fill_percent = (100.0 * volume_litres / max).clamp(0.0, 100.0);
        Level {
            volume_litres,
            fill_percent,
        }
    }

    /// Circular-segment volume for an oil height `h` measured from the tank
    /// floor. Callers must pass `h` already clamped to `[0, diameter]`.
    fn segment_volume_litres(&self, h: f64) -> f64 {
        let r = self.radius_cm();
        // Chord offset from the centre: h = 0 gives m = r, h = 2r gives m = -r.
        let m = r - h;
        // Clamp both the arccos argument and the radicand: at the extremes
        // rounding can push either a hair outside its domain.
        let cos_arg = (m / r).clamp(-1.0, 1.0);
        let radicand = (2.0 * r * h - h * h).max(0.0);
        let area_cm2 = r * r * cos_arg.acos() - m * radicand.sqrt();
        (area_cm2 * self.length_cm / 1000.0).clamp(0.0, self.max_volume_litres())
    }
}

#[cfg(test)]
mod segment_tests {
    use super::TankGeometry;

    #[test]
    fn boundaries_are_exact() {
        let tank = TankGeometry::new(120.0, 270.0).unwrap();
        assert_eq!(tank.segment_volume_litres(0.0), 0.0);
        let full = tank.segment_volume_litres(120.0);
        assert!((full - tank.max_volume_litres()).abs() < 1e-9);
    }

    #[test]
    fn half_height_is_half_volume() {
        let tank = TankGeometry::new(120.0, 270.0).unwrap();
        let half = tank.segment_volume_litres(60.0);
        assert!((half - tank.max_volume_litres() / 2.0).abs() < 1e-9);
    }
}
