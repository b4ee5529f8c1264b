// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

use chrono::{DateTime, Utc};

#[cfg(test)]
pub use self::manual::ManualClock;

/// A source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
