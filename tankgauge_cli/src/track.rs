//! Replay an observation log (CSV) through the gauge and account daily usage.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use eyre::WrapErr;
use serde::Deserialize;
use tankgauge_config::Config;
use tankgauge_core::util::round_dp;
use tankgauge_core::{TankGauge, TankGeometry, TankStatus, UsageState};

use crate::cli::Cli;

/// Observation log CSV schema.
///
/// Expected headers:
/// timestamp,depth_cm
///
/// Example:
/// timestamp,depth_cm
/// 2026-01-05T08:00:00,41.2
/// 2026-01-05T20:00:00,43.9
#[derive(Debug, Deserialize)]
struct ObservationRow {
    timestamp: String,
    depth_cm: f64,
}

pub fn run_track(
    cli: &Cli,
    cfg: &Config,
    input: &Path,
    state: Option<&Path>,
    price_override: Option<f64>,
) -> eyre::Result<()> {
    let mut gauge = build_gauge(cfg, state, price_override)?;

    let reader: Box<dyn Read> = if input == Path::new("-") {
        Box::new(std::io::stdin())
    } else {
        Box::new(
            std::fs::File::open(input)
                .map_err(|e| eyre::eyre!("open observation log {:?}: {}", input, e))?,
        )
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", input, e))?
        .clone();
    let expected = ["timestamp", "depth_cm"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "observation CSV must have headers 'timestamp,depth_cm', got: {}",
            actual.join(",")
        );
    }

    let currency = cfg.pricing.currency.as_str();
    let mut rows: usize = 0;
    for (idx, rec) in rdr.deserialize::<ObservationRow>().enumerate() {
        let row = match rec {
            Ok(row) => row,
            Err(e) => eyre::bail!("invalid CSV row {}: {}", idx + 2, e),
        };
        let at = parse_timestamp(&row.timestamp)
            .ok_or_else(|| eyre::eyre!("invalid CSV row {}: bad timestamp '{}'", idx + 2, row.timestamp))?;
        let status = gauge.record(at, row.depth_cm)?;
        emit(cli.json, currency, at, &status);
        rows += 1;
    }
    tracing::info!(rows, "observation log replayed");

    // Persisted only after a clean replay, so a failed run can be fixed
    // and repeated against the previous snapshot without double counting.
    if let Some(path) = state {
        save_snapshot(path, &gauge)?;
    }
    Ok(())
}

/// Accepts `2026-01-05T08:00:00` and the space-separated variant.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Assemble a gauge from config, CLI price override, and an optional
/// persisted usage snapshot.
pub(crate) fn build_gauge(
    cfg: &Config,
    state: Option<&Path>,
    price_override: Option<f64>,
) -> eyre::Result<TankGauge> {
    let geometry = TankGeometry::try_from(&cfg.tank)?;
    let mut builder = TankGauge::builder()
        .with_geometry(geometry)
        .with_price_per_litre(price_override.unwrap_or(cfg.pricing.price_per_litre));
    if let Some(path) = state
        && path.exists()
    {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("read usage snapshot {}", path.display()))?;
        let snapshot: UsageState = serde_json::from_str(&text)
            .wrap_err_with(|| format!("parse usage snapshot {}", path.display()))?;
        tracing::debug!(path = %path.display(), "usage snapshot restored");
        builder = builder.with_usage_snapshot(snapshot);
    }
    builder.build()
}

pub(crate) fn save_snapshot(path: &Path, gauge: &TankGauge) -> eyre::Result<()> {
    if let Some(snapshot) = gauge.usage_snapshot() {
        let text = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, text)
            .wrap_err_with(|| format!("write usage snapshot {}", path.display()))?;
        tracing::debug!(path = %path.display(), "usage snapshot saved");
    }
    Ok(())
}

/// One status line per observation. Stdout carries data only; logs go to
/// stderr, so `--json` output stays machine-readable.
pub(crate) fn emit(json: bool, currency: &str, at: NaiveDateTime, status: &TankStatus) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "at": at.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "oil_depth_cm": round_dp(status.oil_depth_cm, 1),
                "volume_litres": round_dp(status.volume_litres, 1),
                "fill_percent": round_dp(status.fill_percent, 1),
                "daily_usage_litres": round_dp(status.daily_usage_litres, 1),
                "daily_cost": round_dp(status.daily_cost, 2),
                "currency": currency,
            })
        );
    } else {
        println!(
            "{at}  {vol:>8.1} L  {fill:>5.1}%  used today {used:.1} L ({cost:.2} {currency})",
            at = at.format("%Y-%m-%d %H:%M:%S"),
            vol = status.volume_litres,
            fill = status.fill_percent,
            used = status.daily_usage_litres,
            cost = status.daily_cost,
        );
    }
}
