#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core tank monitoring logic (host-agnostic).
//!
//! This crate turns periodic top-down depth readings from a horizontal
//! cylindrical oil tank into litres, fill percentage and a litres-used-today
//! figure. Sensor access goes through `tankgauge_traits::DepthSensor`; the
//! crate itself does no IO.
//!
//! ## Architecture
//!
//! - **Geometry**: circular-segment conversion from depth to litres
//!   (`geometry` module, pure)
//! - **Usage**: daily consumption accounting with refill tolerance and
//!   midnight reset (`usage` module, explicit state transitions)
//! - **Gauge**: facade owning geometry, pricing and the tracker (`gauge`
//!   module); built via `TankGauge::builder()`
//! - **Sampler**: background polling thread feeding stamped readings to the
//!   host loop (`sampler` module)
//! - **Conversions**: `TryFrom` bridges from `tankgauge_config` types
//!
//! All quantities are `f64`: centimetres in, litres out, naive local time
//! for day-boundary accounting.

// Module declarations
pub mod conversions;
pub mod error;
pub mod gauge;
pub mod geometry;
pub mod mocks;
pub mod sampler;
pub mod usage;
pub mod util;

pub use error::{BuildError, GaugeError, Result};
pub use gauge::{DEFAULT_PRICE_PER_LITRE, GaugeBuilder, TankGauge, TankStatus};
pub use geometry::{Level, TankGeometry};
pub use sampler::{DepthSample, DepthSampler};
pub use usage::{DailyUsageTracker, UsageState};
