//! System clock.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Reads the wall clock; used to stamp issue snapshots.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
