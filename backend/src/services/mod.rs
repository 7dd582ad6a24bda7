//! Service layer for availability and booking-request logic.
//!
//! Everything here is independent of the HTTP layer. The availability index
//! and range validator are pure functions; the feed holds the latest index
//! for the server.

pub mod availability;
pub mod calendar;
pub mod contact;
pub mod feed;
pub mod selection;

pub use availability::{
    is_day_selectable, AvailabilityIndex, Clock, FixedClock, IndexBuilder, SystemClock,
};
pub use calendar::{classify_day, classify_range, month_view, CalendarDay, DayStatus, MonthView};
pub use contact::{compose_link, request_booking, BookingRequestError, ContactError, ContactLink};
pub use feed::{AvailabilityFeed, Snapshot};
pub use selection::{evaluate_selection, SelectionState};
