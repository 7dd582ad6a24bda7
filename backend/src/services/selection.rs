//! Range selection: turning day clicks into a legal booking range.
//!
//! [`evaluate_selection`] is a pure function of the candidate range and the
//! current [`AvailabilityIndex`]. A rejected range is never clamped to the
//! nearest free day; the end is dropped and the start is kept as a fresh
//! anchor so the visitor can try again from the same arrival day.

use serde::{Deserialize, Serialize};

use super::availability::{is_day_selectable, AvailabilityIndex};
use crate::models::{DateRange, Day};

/// The visitor's in-progress or completed choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SelectionState {
    #[default]
    None,
    Anchored {
        from: Day,
    },
    Complete {
        from: Day,
        to: Day,
    },
}

impl SelectionState {
    /// The completed range, if any.
    pub fn range(&self) -> Option<DateRange> {
        match *self {
            SelectionState::Complete { from, to } => Some(DateRange::new(from, to)),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SelectionState::Complete { .. })
    }

    /// Apply a click on `day`.
    ///
    /// Non-selectable days are disabled in the calendar, so clicking one
    /// leaves the state as it was. A click with no anchor, or after a
    /// completed range, starts a new anchor. A click with an anchor
    /// proposes the range between the two days.
    pub fn click(self, day: Day, index: &AvailabilityIndex) -> SelectionState {
        if !is_day_selectable(day, index) {
            return self;
        }
        match self {
            SelectionState::None | SelectionState::Complete { .. } => {
                SelectionState::Anchored { from: day }
            }
            SelectionState::Anchored { from } => {
                evaluate_selection(&DateRange::new(from, day), index)
            }
        }
    }

    /// Back to no selection, e.g. after the booking request went out.
    pub fn reset(self) -> SelectionState {
        SelectionState::None
    }
}

/// Decide whether `candidate` is legal under `index`.
///
/// - An anchor-only candidate is accepted as an anchor.
/// - A complete candidate with any non-selectable day in `[from, to]`
///   collapses to `Anchored { from }`.
/// - Otherwise the result is `Complete { from, to }`.
pub fn evaluate_selection(candidate: &DateRange, index: &AvailabilityIndex) -> SelectionState {
    let from = candidate.from();
    let Some(to) = candidate.to() else {
        return SelectionState::Anchored { from };
    };

    if candidate.days().all(|day| is_day_selectable(day, index)) {
        SelectionState::Complete { from, to }
    } else {
        SelectionState::Anchored { from }
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
