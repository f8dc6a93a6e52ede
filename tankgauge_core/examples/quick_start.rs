//! Quick Start Example
//!
//! This example demonstrates how to set up a gauge for a horizontal
//! cylindrical tank and replay a morning of depth readings through it.

use chrono::{NaiveDate, NaiveDateTime};
use tankgauge_core::{TankGauge, TankGeometry};

fn stamp(hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 15)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

/// Builds a gauge for a 120 cm x 250 cm tank and feeds it a handful of
/// sensor distance readings, printing the derived status after each one.
///
/// # Usage
///
/// Run via `cargo run -p tankgauge_core --example quick_start`.
///
/// # Errors
///
/// Returns an error if configuration or an observation is rejected,
/// surfaced as an `eyre::Report`.
fn main() -> Result<(), eyre::Report> {
    let geometry = TankGeometry::new(120.0, 250.0)?;
    let mut gauge = TankGauge::builder()
        .with_geometry(geometry)
        .with_price_per_litre(0.58)
        .build()?;

    // Distance from the sensor down to the oil surface, in centimetres;
    // the tank drains slowly, then gets a small top-up at 10:30.
    let readings = [
        (stamp(7, 30), 35.0),
        (stamp(8, 30), 35.6),
        (stamp(9, 30), 36.4),
        (stamp(10, 30), 31.0),
        (stamp(11, 30), 31.5),
    ];

    for (at, distance_cm) in readings {
        let status = gauge.record(at, distance_cm)?;
        println!(
            "{at}  depth {:6.1} cm  volume {:8.1} L  fill {:5.1} %  used today {:6.1} L  cost {:.2}",
            status.oil_depth_cm,
            status.volume_litres,
            status.fill_percent,
            status.daily_usage_litres,
            status.daily_cost,
        );
    }

    Ok(())
}
