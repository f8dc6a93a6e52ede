#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas for the tank monitoring system.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Defaults follow common domestic heating-oil installations; anything
//!   tank-specific (the cylinder dimensions) has no default and must be
//!   supplied explicitly.
use serde::Deserialize;

/// Geometry of the monitored tank: a horizontal cylinder, dimensions in
/// centimetres. No defaults; these come from measuring the actual tank.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct TankCfg {
    /// Inner diameter of the cylinder (cm)
    pub diameter_cm: f64,
    /// Straight internal length of the cylinder (cm)
    pub length_cm: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PricingCfg {
    /// Price of one litre of oil, in the configured currency
    pub price_per_litre: f64,
    /// Currency label echoed next to cost values ("GBP", "EUR", ...)
    pub currency: String,
}

impl Default for PricingCfg {
    fn default() -> Self {
        Self {
            price_per_litre: 0.55,
            currency: "GBP".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SensorCfg {
    /// Seconds between depth polls in watch mode
    pub poll_interval_secs: u64,
    /// Max time to wait for a single reading before it counts as missed (ms)
    pub read_timeout_ms: u64,
}

impl Default for SensorCfg {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            read_timeout_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub tank: TankCfg,
    #[serde(default)]
    pub pricing: PricingCfg,
    #[serde(default)]
    pub sensor: SensorCfg,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Tank
        if !self.tank.diameter_cm.is_finite() || self.tank.diameter_cm <= 0.0 {
            eyre::bail!("tank.diameter_cm must be > 0");
        }
        if self.tank.diameter_cm > 500.0 {
            eyre::bail!("tank.diameter_cm is unreasonably large (>500cm)");
        }
        if !self.tank.length_cm.is_finite() || self.tank.length_cm <= 0.0 {
            eyre::bail!("tank.length_cm must be > 0");
        }
        if self.tank.length_cm > 500.0 {
            eyre::bail!("tank.length_cm is unreasonably large (>500cm)");
        }

        // Pricing
        if !self.pricing.price_per_litre.is_finite() || self.pricing.price_per_litre < 0.0 {
            eyre::bail!("pricing.price_per_litre must be >= 0");
        }
        if self.pricing.price_per_litre > 10.0 {
            eyre::bail!("pricing.price_per_litre is unreasonably large (>10/L)");
        }
        if self.pricing.currency.trim().is_empty() {
            eyre::bail!("pricing.currency must not be empty");
        }

        // Sensor
        if self.sensor.poll_interval_secs == 0 {
            eyre::bail!("sensor.poll_interval_secs must be >= 1");
        }
        if self.sensor.poll_interval_secs > 24 * 60 * 60 {
            eyre::bail!("sensor.poll_interval_secs is unreasonably large (>24h)");
        }
        if self.sensor.read_timeout_ms == 0 {
            eyre::bail!("sensor.read_timeout_ms must be >= 1");
        }

        // Logging
        if let Some(rotation) = self.logging.rotation.as_deref()
            && !matches!(rotation, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}
