#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use stay_rust::models::{BookedInterval, BookingDetails, BookingId, BookingRecord, Day};
use stay_rust::services::AvailabilityIndex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Parse a `YYYY-MM-DD` day.
pub fn d(s: &str) -> Day {
    s.parse().expect("valid test day")
}

/// Admin block over `from..=to`.
pub fn block(id: &str, from: &str, to: &str) -> BookingRecord {
    BookingRecord::new_block(
        BookingId::new(id),
        BookedInterval::new(d(from), d(to)),
        BookingDetails::default(),
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    )
}

/// Index with one reservation `2024-06-10..=2024-06-12`, today `2024-06-01`.
pub fn june_index() -> AvailabilityIndex {
    AvailabilityIndex::new(
        vec![BookedInterval::new(d("2024-06-10"), d("2024-06-12"))],
        d("2024-06-01"),
    )
}

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
