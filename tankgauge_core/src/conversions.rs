//! `TryFrom` implementations bridging `tankgauge_config` types to
//! `tankgauge_core` types.
//!
//! These keep the field-by-field mapping (and its validation) out of the CLI.

use crate::gauge::TankGauge;
use crate::geometry::TankGeometry;

// ── TankGeometry ─────────────────────────────────────────────────────────────

impl TryFrom<&tankgauge_config::TankCfg> for TankGeometry {
    type Error = eyre::Report;

    fn try_from(c: &tankgauge_config::TankCfg) -> Result<Self, Self::Error> {
        Self::new(c.diameter_cm, c.length_cm)
    }
}

// ── TankGauge ────────────────────────────────────────────────────────────────

impl TryFrom<&tankgauge_config::Config> for TankGauge {
    type Error = eyre::Report;

    fn try_from(cfg: &tankgauge_config::Config) -> Result<Self, Self::Error> {
        let geometry = TankGeometry::try_from(&cfg.tank)?;
        Self::builder()
            .with_geometry(geometry)
            .with_price_per_litre(cfg.pricing.price_per_litre)
            .build()
    }
}
