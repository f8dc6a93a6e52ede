use std::thread;
use std::time::Duration;

use chrono::NaiveDateTime;

/// Wall-clock abstraction for stamping observations across the stack.
///
/// - now(): returns the current naive local date-time
/// - sleep(): sleeps for the provided duration (implementations may simulate)
///
/// Daily-usage accounting resets at local midnight, so timestamps stay in
/// naive local time end to end; hosts that need zone awareness convert at
/// their own boundary.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
    fn sleep(&self, d: Duration);
}

/// Default, real-time clock backed by the system's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    #[inline]
    fn sleep(&self, d: Duration) {
        if d.is_zero() {
            return;
        }
        thread::sleep(d);
    }
}
