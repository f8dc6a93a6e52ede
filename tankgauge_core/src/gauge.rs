//! Gauge facade: one configured tank, one observation stream.
//!
//! `TankGauge` ties the pure geometry model to the daily-usage tracker and
//! exposes the read-side the display adapters consume. It owns no threads
//! and does no IO; the host feeds it `(timestamp, distance)` pairs.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{BuildError, Result};
use crate::geometry::{Level, TankGeometry};
use crate::usage::{DailyUsageTracker, UsageState};
use crate::util::ensure_finite;

/// Fallback oil price when the host supplies none, in currency per litre.
pub const DEFAULT_PRICE_PER_LITRE: f64 = 0.55;

/// Everything the display layer shows after one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TankStatus {
    /// Height of oil above the tank floor (cm), clamped to the bore.
    pub oil_depth_cm: f64,
    pub volume_litres: f64,
    pub fill_percent: f64,
    pub daily_usage_litres: f64,
    pub daily_cost: f64,
}

/// Stateful monitor for one configured tank.
///
/// Owned by a single host task; observations are folded in one at a time
/// with non-decreasing timestamps. A failed observation never disturbs the
/// previously accumulated state or the last displayed level.
#[derive(Debug)]
pub struct TankGauge {
    geometry: TankGeometry,
    price_per_litre: f64,
    tracker: DailyUsageTracker,
    last_level: Option<Level>,
    last_oil_depth_cm: Option<f64>,
}

impl TankGauge {
    /// Start building a TankGauge.
    #[must_use]
    pub fn builder() -> GaugeBuilder {
        GaugeBuilder::default()
    }

    /// Fold one `(timestamp, sensor distance)` reading into the gauge.
    ///
    /// Non-finite distances are rejected before any state changes; readings
    /// outside the physical range clamp per the geometry model. Timestamps
    /// must not move backwards (equal is fine). Errors are terminal for this
    /// call only: the gauge keeps serving the previous values.
    pub fn record(&mut self, at: NaiveDateTime, sensor_distance_cm: f64) -> Result<TankStatus> {
        ensure_finite("depth", sensor_distance_cm)?;
        let oil_depth_cm = self.geometry.oil_depth_cm(sensor_distance_cm);
        let level = self.geometry.level_at(sensor_distance_cm);
        self.tracker.observe(at, level.volume_litres)?;
        self.last_level = Some(level);
        self.last_oil_depth_cm = Some(oil_depth_cm);
        tracing::debug!(
            volume_litres = level.volume_litres,
            fill_percent = level.fill_percent,
            "observation recorded"
        );
        Ok(TankStatus {
            oil_depth_cm,
            volume_litres: level.volume_litres,
            fill_percent: level.fill_percent,
            daily_usage_litres: self.tracker.daily_usage_litres(),
            daily_cost: self.daily_cost(),
        })
    }

    /// Latest full status, or `None` before the first recorded reading.
    #[must_use]
    pub fn status(&self) -> Option<TankStatus> {
        let level = self.last_level?;
        Some(TankStatus {
            oil_depth_cm: self.last_oil_depth_cm.unwrap_or_default(),
            volume_litres: level.volume_litres,
            fill_percent: level.fill_percent,
            daily_usage_litres: self.tracker.daily_usage_litres(),
            daily_cost: self.daily_cost(),
        })
    }

    /// Latest computed volume in litres, if a reading arrived yet.
    #[must_use]
    pub fn current_volume_litres(&self) -> Option<f64> {
        self.last_level.map(|l| l.volume_litres)
    }

    /// Latest fill percentage, if a reading arrived yet.
    #[must_use]
    pub fn current_fill_percent(&self) -> Option<f64> {
        self.last_level.map(|l| l.fill_percent)
    }

    /// Latest clamped oil height above the tank floor, if a reading arrived yet.
    #[must_use]
    pub fn current_oil_depth_cm(&self) -> Option<f64> {
        self.last_oil_depth_cm
    }

    /// Litres consumed since the start of the tracked day.
    #[must_use]
    pub fn daily_usage_litres(&self) -> f64 {
        self.tracker.daily_usage_litres()
    }

    /// Cost of today's consumption; derived on read so a price change
    /// reprices the whole day without touching the litre count.
    #[must_use]
    pub fn daily_cost(&self) -> f64 {
        self.tracker.daily_usage_litres() * self.price_per_litre
    }

    #[must_use]
    pub fn price_per_litre(&self) -> f64 {
        self.price_per_litre
    }

    #[must_use]
    pub fn geometry(&self) -> &TankGeometry {
        &self.geometry
    }

    /// Reconfigure the oil price. Usage history is untouched; only future
    /// `daily_cost` reads change.
    pub fn set_price_per_litre(&mut self, price_per_litre: f64) -> Result<()> {
        if !price_per_litre.is_finite() || price_per_litre < 0.0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "price per litre must be finite and >= 0",
            )));
        }
        self.price_per_litre = price_per_litre;
        Ok(())
    }

    /// Usage snapshot for the host to persist across restarts.
    #[must_use]
    pub fn usage_snapshot(&self) -> Option<UsageState> {
        self.tracker.snapshot()
    }

    /// Replace the tracker state with a persisted snapshot. The displayed
    /// level stays empty until the next reading; only accounting state is
    /// restored.
    pub fn restore_usage(&mut self, snapshot: UsageState) {
        self.tracker = DailyUsageTracker::restore(snapshot);
    }
}

/// Builder for [`TankGauge`]. Geometry is mandatory; price and a restored
/// usage snapshot are optional.
#[derive(Debug, Default)]
pub struct GaugeBuilder {
    geometry: Option<TankGeometry>,
    price_per_litre: Option<f64>,
    usage: Option<UsageState>,
}

impl GaugeBuilder {
    #[must_use]
    pub fn with_geometry(mut self, geometry: TankGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    #[must_use]
    pub fn with_price_per_litre(mut self, price_per_litre: f64) -> Self {
        self.price_per_litre = Some(price_per_litre);
        self
    }

    #[must_use]
    pub fn with_usage_snapshot(mut self, snapshot: UsageState) -> Self {
        self.usage = Some(snapshot);
        self
    }

    /// Validate and build. Fails with a typed [`BuildError`] when geometry
    /// is missing or the price is out of range.
    pub fn build(self) -> Result<TankGauge> {
        let geometry = self
            .geometry
            .ok_or_else(|| eyre::Report::new(BuildError::MissingGeometry))?;
        let price_per_litre = self.price_per_litre.unwrap_or(DEFAULT_PRICE_PER_LITRE);
        if !price_per_litre.is_finite() || price_per_litre < 0.0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "price per litre must be finite and >= 0",
            )));
        }
        let tracker = match self.usage {
            Some(snapshot) => DailyUsageTracker::restore(snapshot),
            None => DailyUsageTracker::new(),
        };
        Ok(TankGauge {
            geometry,
            price_per_litre,
            tracker,
            last_level: None,
            last_oil_depth_cm: None,
        })
    }
}
