//! Availability index: which days can still be booked.
//!
//! The index is built from a full snapshot of booking records and is never
//! patched in place; a new snapshot produces a new index. Days strictly
//! before `today` are blocked regardless of the stored intervals.

use chrono::{FixedOffset, Offset, Utc};
use log::{debug, warn};
use std::sync::Arc;

use crate::models::{BookedInterval, BookingRecord, Day};

/// Blocked intervals plus the day the index considers "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityIndex {
    blocked: Arc<[BookedInterval]>,
    today: Day,
}

impl AvailabilityIndex {
    pub fn new(blocked: Vec<BookedInterval>, today: Day) -> Self {
        Self {
            blocked: blocked.into(),
            today,
        }
    }

    /// Index with no stored intervals; only past days are blocked.
    pub fn empty(today: Day) -> Self {
        Self::new(Vec::new(), today)
    }

    pub fn blocked_intervals(&self) -> &[BookedInterval] {
        &self.blocked
    }

    pub fn today(&self) -> Day {
        self.today
    }

    /// Same intervals seen from another day. Shares the interval list.
    pub fn with_today(&self, today: Day) -> Self {
        Self {
            blocked: Arc::clone(&self.blocked),
            today,
        }
    }
}

/// Whether `day` can be part of a selection under `index`.
///
/// Today is selectable; earlier days are not. Interval ends are blocked.
/// This is the single predicate behind validation and calendar rendering.
pub fn is_day_selectable(day: Day, index: &AvailabilityIndex) -> bool {
    if day < index.today {
        return false;
    }
    !index
        .blocked
        .iter()
        .any(|interval| interval.contains(day))
}

/// Turns booking records into an [`AvailabilityIndex`].
#[derive(Debug, Clone, Copy)]
pub struct IndexBuilder {
    offset: FixedOffset,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl IndexBuilder {
    /// Builder normalizing timestamps into the site's UTC offset.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Blocked intervals for every record that has both ends.
    ///
    /// Records missing a start or end, or carrying an unreadable date,
    /// are skipped.
    pub fn intervals<'a, I>(&self, records: I) -> Vec<BookedInterval>
    where
        I: IntoIterator<Item = &'a BookingRecord>,
    {
        let mut intervals = Vec::new();
        for record in records {
            match (&record.start_date, &record.end_date) {
                (Some(_), Some(_)) => match record.interval(&self.offset) {
                    Some(interval) => intervals.push(interval),
                    None => warn!(
                        "Skipping booking {}: unreadable start or end date",
                        record.id
                    ),
                },
                _ => debug!("Skipping booking {}: missing start or end date", record.id),
            }
        }
        intervals
    }

    /// Build an index from a full snapshot of records.
    pub fn build<'a, I>(&self, records: I, today: Day) -> AvailabilityIndex
    where
        I: IntoIterator<Item = &'a BookingRecord>,
    {
        AvailabilityIndex::new(self.intervals(records), today)
    }
}

/// Source of the current calendar day.
pub trait Clock: Send + Sync {
    fn today(&self) -> Day;
}

/// Wall clock read in the site's UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Day {
        Day::new(Utc::now().with_timezone(&self.offset).date_naive())
    }
}

/// Clock pinned to one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Day);

impl Clock for FixedClock {
    fn today(&self) -> Day {
        self.0
    }
}
