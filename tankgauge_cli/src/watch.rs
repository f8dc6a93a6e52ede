//! Live polling loop: sample the sensor on an interval, update the gauge,
//! stream status lines until Ctrl-C or a sample limit.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use eyre::WrapErr;
use tankgauge_config::Config;
use tankgauge_core::{DepthSampler, GaugeError};
use tankgauge_traits::SystemClock;

use crate::cli::Cli;
use crate::sim::SimulatedDepthSensor;
use crate::track::{build_gauge, emit, save_snapshot};

pub fn run_watch(
    cli: &Cli,
    cfg: &Config,
    state: Option<&Path>,
    interval_override: Option<u64>,
    samples: u64,
) -> eyre::Result<()> {
    let mut gauge = build_gauge(cfg, state, None)?;

    let interval = Duration::from_secs(interval_override.unwrap_or(cfg.sensor.poll_interval_secs));
    let timeout = Duration::from_millis(cfg.sensor.read_timeout_ms);
    let sensor = SimulatedDepthSensor::from_env(gauge.geometry().diameter_cm());
    let sampler = DepthSampler::spawn(sensor, interval, timeout, SystemClock::new());

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))
            .wrap_err("install Ctrl-C handler")?;
    }

    tracing::info!(
        interval_secs = interval.as_secs(),
        timeout_ms = timeout.as_millis() as u64,
        "watch started"
    );

    let stall_limit_ms = stall_limit_ms(interval, timeout);
    let currency = cfg.pricing.currency.as_str();

    let result = (|| -> eyre::Result<()> {
        let mut seen: u64 = 0;
        loop {
            if stop.load(Ordering::SeqCst) {
                tracing::info!("watch interrupted");
                return Ok(());
            }
            match sampler.recv_timeout(Duration::from_millis(200)) {
                Some(sample) => {
                    match gauge.record(sample.at, sample.sensor_distance_cm) {
                        Ok(status) => {
                            emit(cli.json, currency, sample.at, &status);
                            seen += 1;
                            if samples != 0 && seen >= samples {
                                tracing::info!(samples = seen, "watch finished");
                                return Ok(());
                            }
                        }
                        // The wall clock can step backwards (NTP, DST); the
                        // sample is stale, not the session.
                        Err(err)
                            if matches!(
                                err.downcast_ref::<GaugeError>(),
                                Some(GaugeError::OutOfOrder { .. })
                            ) =>
                        {
                            tracing::warn!(error = %err, "clock went backwards, sample dropped");
                        }
                        Err(err) => return Err(err),
                    }
                }
                None => {
                    if sampler.stalled_for_ms() > stall_limit_ms {
                        return Err(eyre::Report::new(GaugeError::Timeout));
                    }
                }
            }
        }
    })();

    // Live readings cannot be replayed, so the snapshot is written even
    // when the loop ends in an error.
    if let Some(path) = state {
        save_snapshot(path, &gauge)?;
    }
    result
}

/// How long the sampler may go without a good reading before the session
/// is declared dead. Saturates; `--interval-secs` is not range-checked.
fn stall_limit_ms(interval: Duration, timeout: Duration) -> u64 {
    let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
    let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    timeout_ms
        .saturating_mul(4)
        .max(interval_ms.saturating_mul(2))
        .max(1_000)
}
