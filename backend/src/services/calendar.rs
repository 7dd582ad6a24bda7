//! Per-day status tags for rendering the calendar.
//!
//! Tags are derived from [`is_day_selectable`]; a day is `Available`
//! exactly when the validator would accept it.

use serde::{Deserialize, Serialize};

use super::availability::{is_day_selectable, AvailabilityIndex};
use crate::models::{DateRange, Day};

/// Rendering status of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Available,
    Booked,
    Past,
}

/// A day and its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: Day,
    pub status: DayStatus,
}

/// All days of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub today: Day,
    pub days: Vec<CalendarDay>,
}

impl MonthView {
    pub fn available_count(&self) -> usize {
        self.days
            .iter()
            .filter(|d| d.status == DayStatus::Available)
            .count()
    }
}

/// Classify a single day.
pub fn classify_day(day: Day, index: &AvailabilityIndex) -> DayStatus {
    if is_day_selectable(day, index) {
        DayStatus::Available
    } else if day < index.today() {
        DayStatus::Past
    } else {
        DayStatus::Booked
    }
}

/// Classify every day of an inclusive range.
pub fn classify_range(range: &DateRange, index: &AvailabilityIndex) -> Vec<CalendarDay> {
    range
        .days()
        .map(|day| CalendarDay {
            day,
            status: classify_day(day, index),
        })
        .collect()
}

/// Month grid for `year`/`month`, `None` when the month does not exist.
pub fn month_view(year: i32, month: u32, index: &AvailabilityIndex) -> Option<MonthView> {
    let first = Day::from_ymd(year, month, 1)?;
    let last = match month {
        12 => Day::from_ymd(year + 1, 1, 1),
        _ => Day::from_ymd(year, month + 1, 1),
    }
    .and_then(|next| next.date().pred_opt())
    .map(Day::new)?;

    Some(MonthView {
        year,
        month,
        today: index.today(),
        days: classify_range(&DateRange::new(first, last), index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookedInterval;

    fn d(s: &str) -> Day {
        s.parse().unwrap()
    }

    fn index() -> AvailabilityIndex {
        AvailabilityIndex::new(
            vec![BookedInterval::new(d("2024-06-10"), d("2024-06-12"))],
            d("2024-06-05"),
        )
    }

    #[test]
    fn test_classify_day() {
        let index = index();
        assert_eq!(classify_day(d("2024-06-04"), &index), DayStatus::Past);
        assert_eq!(classify_day(d("2024-06-05"), &index), DayStatus::Available);
        assert_eq!(classify_day(d("2024-06-10"), &index), DayStatus::Booked);
        assert_eq!(classify_day(d("2024-06-13"), &index), DayStatus::Available);
    }

    #[test]
    fn test_month_view_june() {
        let view = month_view(2024, 6, &index()).unwrap();
        assert_eq!(view.days.len(), 30);
        assert_eq!(view.days[0].day, d("2024-06-01"));
        assert_eq!(view.days[29].day, d("2024-06-30"));
        // 4 past days, 3 booked days.
        assert_eq!(view.available_count(), 23);
    }

    #[test]
    fn test_month_view_december_and_leap_february() {
        let index = AvailabilityIndex::empty(d("2024-01-01"));
        assert_eq!(month_view(2024, 12, &index).unwrap().days.len(), 31);
        assert_eq!(month_view(2024, 2, &index).unwrap().days.len(), 29);
        assert!(month_view(2024, 13, &index).is_none());
    }

    #[test]
    fn test_status_agrees_with_predicate() {
        let index = index();
        for cell in month_view(2024, 6, &index).unwrap().days {
            assert_eq!(
                cell.status == DayStatus::Available,
                is_day_selectable(cell.day, &index)
            );
        }
    }
}
