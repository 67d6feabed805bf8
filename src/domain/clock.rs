use chrono::{DateTime, Local, Timelike, Utc};
use std::sync::Arc;

/// Wall-clock access, injectable so pricing by hour can be tested.
pub trait Clock: Send + Sync {
    // ---
    fn now(&self) -> DateTime<Utc>;

    /// Hour of day (0..=23) in the user's local time.
    fn local_hour(&self) -> u32;
}

pub type ClockPtr = Arc<dyn Clock>;

pub struct SystemClock;

impl Clock for SystemClock {
    // ---
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// Always reports the same instant; local hour is taken from UTC.
pub struct FixedClock {
    // ---
    at: DateTime<Utc>,
}

impl FixedClock {
    // ---
    pub fn new(at: DateTime<Utc>) -> Self {
        // ---
        Self { at }
    }
}

impl Clock for FixedClock {
    // ---
    fn now(&self) -> DateTime<Utc> {
        self.at
    }

    fn local_hour(&self) -> u32 {
        self.at.hour()
    }
}
