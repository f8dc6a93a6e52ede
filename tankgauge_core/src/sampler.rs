//! Background depth sampling utilities.
//!
//! Spawns a thread that owns the `DepthSensor`, stamps each successful
//! reading with the wall clock, and publishes the latest sample via a
//! bounded channel. Read failures are logged and skipped; the consumer
//! watches `stalled_for_ms` for staleness.
//!
//! Safety: Each `DepthSampler` spawns exactly one thread that is
//! automatically shut down when the `DepthSampler` is dropped, preventing
//! thread leaks.
use crossbeam_channel as xch;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use tankgauge_traits::DepthSensor;
use tankgauge_traits::clock::Clock;

/// One stamped reading from the depth sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSample {
    pub at: NaiveDateTime,
    pub sensor_distance_cm: f64,
}

pub struct DepthSampler {
    rx: xch::Receiver<DepthSample>,
    last_ok: Arc<AtomicU64>,
    epoch: Instant,
    /// Shutdown flag for immediate response (atomic for lock-free check)
    shutdown: Arc<AtomicBool>,
    /// Join handle for graceful thread cleanup
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl DepthSampler {
    /// Poll `sensor` every `interval`, stamping successful reads with `clock`.
    ///
    /// The channel holds a single sample and sends never block: when the
    /// consumer has not drained the previous sample it is displaced by the
    /// new one, so a stalled consumer always wakes to the newest reading
    /// and can never wedge the sampler thread (or the join in `Drop`).
    pub fn spawn<S: DepthSensor + Send + 'static, C: Clock + Send + Sync + 'static>(
        mut sensor: S,
        interval: Duration,
        timeout: Duration,
        clock: C,
    ) -> Self {
        let (tx, rx) = xch::bounded(1);
        let worker_rx = rx.clone();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let last_ok = Arc::new(AtomicU64::new(0));
        let last_ok_clone = last_ok.clone();
        let epoch = Instant::now();

        let join_handle = std::thread::spawn(move || {
            loop {
                // Immediate shutdown check (lock-free atomic)
                if shutdown_clone.load(Ordering::Relaxed) {
                    tracing::debug!("depth sampler thread received shutdown signal");
                    break;
                }

                match sensor.read(timeout) {
                    Ok(sensor_distance_cm) => {
                        last_ok_clone.store(ms_since(epoch), Ordering::Relaxed);
                        let sample = DepthSample {
                            at: clock.now(),
                            sensor_distance_cm,
                        };
                        match tx.try_send(sample) {
                            Ok(()) => {}
                            Err(xch::TrySendError::Full(sample)) => {
                                // An older sample sits undelivered; displace it
                                // so the buffer holds the newest reading. The
                                // channel is MPMC, so racing the consumer here
                                // is harmless.
                                let _ = worker_rx.try_recv();
                                if let Err(xch::TrySendError::Disconnected(_)) =
                                    tx.try_send(sample)
                                {
                                    tracing::debug!(
                                        "depth sampler consumer disconnected, exiting thread"
                                    );
                                    break;
                                }
                            }
                            Err(xch::TrySendError::Disconnected(_)) => {
                                tracing::debug!(
                                    "depth sampler consumer disconnected, exiting thread"
                                );
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "depth read failed, skipping sample");
                    }
                }

                // Check shutdown before sleep to avoid unnecessary delay
                if shutdown_clone.load(Ordering::Relaxed) {
                    break;
                }
                sleep_with_shutdown(&clock, interval, &shutdown_clone);
            }
            tracing::trace!("depth sampler thread exiting cleanly");
        });

        Self {
            rx,
            last_ok,
            epoch,
            shutdown,
            join_handle: Some(join_handle),
        }
    }

    /// Newest undelivered sample, discarding anything older. `None` when the
    /// sampler produced nothing since the last call.
    #[must_use]
    pub fn latest(&self) -> Option<DepthSample> {
        self.rx.try_iter().last()
    }

    /// Block up to `wait` for the next sample.
    #[must_use]
    pub fn recv_timeout(&self, wait: Duration) -> Option<DepthSample> {
        self.rx.recv_timeout(wait).ok()
    }

    /// Milliseconds since the last successful sensor read.
    #[must_use]
    pub fn stalled_for_ms(&self) -> u64 {
        ms_since(self.epoch).saturating_sub(self.last_ok.load(Ordering::Relaxed))
    }
}

fn ms_since(epoch: Instant) -> u64 {
    let ms = Instant::now().saturating_duration_since(epoch).as_millis();
    ms.min(u128::from(u64::MAX)) as u64
}

/// Sleep `total` in short slices so a shutdown request arriving during a
/// long poll interval does not hold up `Drop::join`.
fn sleep_with_shutdown<C: Clock>(clock: &C, total: Duration, shutdown: &AtomicBool) {
    const SLICE: Duration = Duration::from_millis(50);
    let mut remaining = total;
    while !remaining.is_zero() {
        if shutdown.load(Ordering::Relaxed) {
            return;
        }
        let step = remaining.min(SLICE);
        clock.sleep(step);
        remaining = remaining.saturating_sub(step);
    }
}

impl Drop for DepthSampler {
    fn drop(&mut self) {
        // Signal shutdown immediately (atomic store is very fast, <10ns)
        self.shutdown.store(true, Ordering::Relaxed);

        // The thread exits:
        // 1. Immediately if it is between reads (shutdown check)
        // 2. After the current sensor.read() completes (up to its timeout)
        // 3. Within one sleep slice if it was pacing between reads
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("depth sampler thread joined successfully");
                }
                Err(e) => {
                    // Thread panicked; log but don't propagate (we're in Drop)
                    tracing::warn!(?e, "depth sampler thread panicked during shutdown");
                }
            }
        }
    }
}
