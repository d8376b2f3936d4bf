//! Time sources for the presence store.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::cell::Cell;

pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Always returns the same instant. A CLI invocation reads the time once
/// and runs the whole command against it.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Local>>,
}

impl ManualClock {
    /// Start at `millis` since the Unix epoch. Out-of-range values start at the epoch.
    pub fn at_millis(millis: i64) -> Self {
        Self {
            now: Cell::new(from_millis(millis)),
        }
    }

    pub fn set_millis(&self, millis: i64) {
        self.now.set(from_millis(millis));
    }

    pub fn advance_millis(&self, millis: i64) {
        self.now
            .set(self.now.get() + chrono::Duration::milliseconds(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

/// Epoch milliseconds → local timestamp.
pub fn from_millis(millis: i64) -> DateTime<Local> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Local))
}
