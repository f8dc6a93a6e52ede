//! Daily consumption accounting over a stream of volume observations.
//!
//! The tracker folds `(timestamp, volume)` pairs into a running
//! litres-used-today figure. Volume drops count as consumption, volume
//! rises are refills and leave the accumulator alone, and the whole thing
//! restarts at the first observation of each new calendar day.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{GaugeError, Result};
use crate::util::ensure_finite;

/// The persistent state of one tracker between observations.
///
/// Plain data on purpose: the host serializes this across restarts and
/// hands it back via [`DailyUsageTracker::restore`], so accumulation
/// survives a restart within the same calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageState {
    /// Volume recorded when the current day's accounting began.
    pub day_start_volume_litres: f64,
    /// Most recent volume observed, refills included.
    pub last_volume_litres: f64,
    /// Litres consumed since `day_start_volume_litres` was set.
    pub accumulated_usage_litres: f64,
    /// Calendar day the accumulator applies to.
    pub current_day: NaiveDate,
    /// Timestamp of the most recent observation; enforces ordering.
    pub last_observed_at: NaiveDateTime,
}

impl UsageState {
    /// State for the first observation of a day (or ever). Records no usage.
    fn open(at: NaiveDateTime, volume_litres: f64) -> Self {
        Self {
            day_start_volume_litres: volume_litres,
            last_volume_litres: volume_litres,
            accumulated_usage_litres: 0.0,
            current_day: at.date(),
            last_observed_at: at,
        }
    }

    /// Pure transition for one observation.
    ///
    /// Crossing a day boundary restarts the baseline from the observed
    /// volume itself, so oil burned between the old day's last reading and
    /// the boundary is dropped rather than carried into the new day. A
    /// multi-day gap collapses into a single restart.
    fn advance(&self, at: NaiveDateTime, volume_litres: f64) -> Self {
        let mut next = if at.date() == self.current_day {
            self.clone()
        } else {
            Self::open(at, volume_litres)
        };
        let delta = next.last_volume_litres - volume_litres;
        if delta > 0.0 {
            next.accumulated_usage_litres += delta;
        }
        // The baseline for the next delta always reflects the latest
        // physical reading; only the accumulator ignores increases.
        next.last_volume_litres = volume_litres;
        next.last_observed_at = at;
        next
    }
}

/// Accumulates litres consumed per calendar day from a volume stream.
///
/// One tracker per tank, one writer at a time; the host delivers
/// observations in non-decreasing timestamp order and each update is a
/// plain, non-blocking state transition.
#[derive(Debug, Default)]
pub struct DailyUsageTracker {
    state: Option<UsageState>,
}

impl DailyUsageTracker {
    #[must_use]
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Rebuild a tracker from a persisted snapshot.
    ///
    /// A snapshot from an earlier day is fine: the next observation crosses
    /// the day boundary and resets the accumulator.
    #[must_use]
    pub fn restore(snapshot: UsageState) -> Self {
        Self {
            state: Some(snapshot),
        }
    }

    /// Snapshot for the host to persist; `None` until the first observation.
    #[must_use]
    pub fn snapshot(&self) -> Option<UsageState> {
        self.state.clone()
    }

    /// Fold one `(timestamp, volume)` observation into the tracker.
    ///
    /// Rejects non-finite volumes and timestamps earlier than the previous
    /// observation (equal is fine); a rejected observation leaves the stored
    /// state exactly as it was.
    pub fn observe(&mut self, at: NaiveDateTime, volume_litres: f64) -> Result<()> {
        ensure_finite("volume", volume_litres)?;
        if let Some(state) = &self.state
            && at < state.last_observed_at
        {
            return Err(eyre::Report::new(GaugeError::OutOfOrder {
                at,
                prev: state.last_observed_at,
            }));
        }
        let next = match &self.state {
            None => UsageState::open(at, volume_litres),
            Some(state) => {
                if at.date() != state.current_day {
                    tracing::debug!(day = %at.date(), "daily usage accounting reset");
                }
                state.advance(at, volume_litres)
            }
        };
        self.state = Some(next);
        Ok(())
    }

    /// Litres consumed since the start of the tracked day; `0.0` before the
    /// first observation.
    #[must_use]
    pub fn daily_usage_litres(&self) -> f64 {
        self.state
            .as_ref()
            .map_or(0.0, |s| s.accumulated_usage_litres)
    }

    /// Most recent volume observation, if any arrived yet.
    #[must_use]
    pub fn last_volume_litres(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.last_volume_litres)
    }

    /// Day the accumulator currently applies to.
    #[must_use]
    pub fn current_day(&self) -> Option<NaiveDate> {
        self.state.as_ref().map(|s| s.current_day)
    }
}
