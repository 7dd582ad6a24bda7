//! Inclusive date ranges.
//!
//! [`DateRange`] is what a visitor proposes: a `from` day and an optional
//! `to` day. With no `to` it is only an anchor. [`BookedInterval`] is the
//! complete range materialized from a stored reservation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::day::Day;

/// A candidate selection: an anchor day plus an optional end day.
///
/// When `to` is present `from <= to` always holds; the constructors order
/// the endpoints, and deserialization goes through the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDateRange")]
pub struct DateRange {
    from: Day,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<Day>,
}

#[derive(Deserialize)]
struct RawDateRange {
    from: Day,
    #[serde(default)]
    to: Option<Day>,
}

impl From<RawDateRange> for DateRange {
    fn from(raw: RawDateRange) -> Self {
        match raw.to {
            Some(to) => DateRange::new(raw.from, to),
            None => DateRange::anchor(raw.from),
        }
    }
}

impl DateRange {
    /// Complete range over two days in either order.
    pub fn new(a: Day, b: Day) -> Self {
        let (from, to) = if a <= b { (a, b) } else { (b, a) };
        Self { from, to: Some(to) }
    }

    /// Anchor-only range: a start day with no end chosen yet.
    pub fn anchor(from: Day) -> Self {
        Self { from, to: None }
    }

    pub fn from(&self) -> Day {
        self.from
    }

    pub fn to(&self) -> Option<Day> {
        self.to
    }

    pub fn is_complete(&self) -> bool {
        self.to.is_some()
    }

    /// Every day from `from` to `to`, both included. An anchor yields just `from`.
    pub fn days(&self) -> DayIter {
        DayIter {
            next: Some(self.from),
            last: self.to.unwrap_or(self.from),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to {
            Some(to) => write!(f, "{}..={}", self.from, to),
            None => write!(f, "{}..", self.from),
        }
    }
}

/// Ascending iterator over an inclusive span of days.
#[derive(Debug, Clone)]
pub struct DayIter {
    next: Option<Day>,
    last: Day,
}

impl Iterator for DayIter {
    type Item = Day;

    fn next(&mut self) -> Option<Day> {
        let current = self.next?;
        if current > self.last {
            self.next = None;
            return None;
        }
        self.next = if current == self.last {
            None
        } else {
            current.succ()
        };
        Some(current)
    }
}

/// A blocked span derived from a persisted reservation. Both ends are blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookedInterval {
    pub from: Day,
    pub to: Day,
}

impl BookedInterval {
    /// Build an interval, swapping the ends if they arrive reversed.
    pub fn new(a: Day, b: Day) -> Self {
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }

    pub fn contains(&self, day: Day) -> bool {
        self.from <= day && day <= self.to
    }
}

impl From<BookedInterval> for DateRange {
    fn from(interval: BookedInterval) -> Self {
        DateRange::new(interval.from, interval.to)
    }
}
