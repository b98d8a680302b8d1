//! Wall-clock access for the long-running loops.

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};

/// Source of the current time and of blocking waits.
///
/// `sprint` and `watch` read time only through this trait so tests can drive
/// them without sleeping.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;

    fn sleep(&self, duration: Duration);
}

/// The real local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
