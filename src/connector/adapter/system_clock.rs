use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

use crate::application::Clock;

/// Wall clock with microsecond resolution that never repeats an instant,
/// so consecutive writes always get increasing `updatedAt` stamps.
pub struct SystemClock {
    last_micros: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last_micros: AtomicI64::new(i64::MIN),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now().timestamp_micros();
        let mut previous = self.last_micros.load(Ordering::Relaxed);
        loop {
            let next = wall.max(previous.saturating_add(1));
            match self.last_micros.compare_exchange_weak(
                previous,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return DateTime::from_timestamp_micros(next).unwrap_or_else(Utc::now),
                Err(actual) => previous = actual,
            }
        }
    }
}
