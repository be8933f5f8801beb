// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamps and synthetic identifiers.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Calendar date as "YYYY-MM-DD".
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Issues strictly increasing millisecond stamps.
///
/// Wall-clock milliseconds are used when they move forward; otherwise the
/// previous stamp is bumped by one so ids stay unique within a process.
#[derive(Debug, Default)]
pub struct MonotonicMillis {
    last: AtomicI64,
}

impl MonotonicMillis {
    pub fn next(&self, now: DateTime<Utc>) -> i64 {
        let wall = now.timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = wall.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = DateTime::parse_from_rfc3339("2026-03-09T23:59:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date(date), "2026-03-09");
    }

    #[test]
    fn test_same_instant_yields_distinct_stamps() {
        let clock = MonotonicMillis::default();
        let now = Utc::now();

        let a = clock.next(now);
        let b = clock.next(now);
        let c = clock.next(now);

        assert_eq!(a, now.timestamp_millis());
        assert_eq!(b, a + 1);
        assert_eq!(c, a + 2);
    }
}
