//! Clock abstraction for the time endpoint
//!
//! The production variant reads the system clock; the fixed variant
//! exists so handlers can be tested against a deterministic instant.

use chrono::NaiveDateTime;

/// Source of the current local date-time.
pub trait TimeProvider: Send + Sync {
    /// Returns "now" with sub-second precision.
    fn now(&self) -> NaiveDateTime;
}

/// [`TimeProvider`] backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeProvider for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// [`TimeProvider`] that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl TimeProvider for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
