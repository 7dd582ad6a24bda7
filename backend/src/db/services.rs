//! High-level store operations.
//!
//! Repository-agnostic functions holding the business rules of the admin
//! panel: blocking dates, editing client/payment notes, removing blocks and
//! setting the nightly price. They work with any [`FullRepository`].
//!
//! # Usage
//!
//! ```no_run
//! use chrono::{Offset, Utc};
//! use stay_rust::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let bookings = services::list_bookings(&repo, &Utc.fix()).await?;
//!     println!("Found {} bookings", bookings.len());
//!     Ok(())
//! }
//! ```

use chrono::{DateTime, FixedOffset, Utc};
use log::info;
use std::cmp::Reverse;
use tokio::sync::Mutex;

use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{
    BookedInterval, BookingDetails, BookingId, BookingRecord, BookingUpdate, DateRange, Day,
    PricingSettings,
};
use crate::services::{evaluate_selection, IndexBuilder, SelectionState};

/// Held from the overlap check until the new block is stored.
static BLOCK_WRITES: Mutex<()> = Mutex::const_new(());

// ==================== Health ====================

/// Check if the store is reachable.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Bookings ====================

/// Every booking, latest start first. Records without a readable start go last.
pub async fn list_bookings<R: FullRepository + ?Sized>(
    repo: &R,
    offset: &FixedOffset,
) -> RepositoryResult<Vec<BookingRecord>> {
    let mut bookings = repo.list_bookings().await?;
    bookings.sort_by_key(|b| {
        let start = b.start_date.as_ref().and_then(|d| d.to_day(offset));
        (Reverse(start), b.id.clone())
    });
    Ok(bookings)
}

pub async fn get_booking<R: FullRepository + ?Sized>(
    repo: &R,
    id: &BookingId,
) -> RepositoryResult<BookingRecord> {
    repo.get_booking(id).await
}

/// Block `range` from the admin panel.
///
/// The range goes through the same validator as visitor selections, so
/// it must be complete and may not touch a past or already-blocked day.
/// Blocked days are read from the store itself, and concurrent calls are
/// serialized, so two overlapping requests cannot both succeed.
///
/// # Returns
/// * `Ok(BookingRecord)` - The stored block
/// * `Err(RepositoryError::ValidationError)` - If the range or amounts are rejected
pub async fn block_dates<R: FullRepository + ?Sized>(
    repo: &R,
    builder: &IndexBuilder,
    today: Day,
    range: &DateRange,
    details: BookingDetails,
    now: DateTime<Utc>,
) -> RepositoryResult<BookingRecord> {
    let context = || ErrorContext::new("block_dates").with_entity("booking");

    if !range.is_complete() {
        return Err(RepositoryError::validation_with_context(
            "Select a date range to block",
            context(),
        ));
    }
    check_amounts(details.total_amount, details.paid_amount, context)?;

    let _guard = BLOCK_WRITES.lock().await;
    let existing = repo.list_bookings().await?;
    let index = builder.build(&existing, today);

    let interval = match evaluate_selection(range, &index) {
        SelectionState::Complete { from, to } => BookedInterval::new(from, to),
        _ => {
            return Err(RepositoryError::validation_with_context(
                format!("Range {} overlaps past or blocked days", range),
                context().with_details(format!("today={}", today)),
            ))
        }
    };

    let record = BookingRecord::new_block(BookingId::generate(), interval, details, now);
    let stored = repo.insert_booking(record).await?;
    info!(
        "Blocked {}..={} for {} (booking {})",
        interval.from, interval.to, stored.client_name, stored.id
    );
    Ok(stored)
}

/// Edit the client/payment fields of a booking.
pub async fn update_booking<R: FullRepository + ?Sized>(
    repo: &R,
    id: &BookingId,
    update: &BookingUpdate,
) -> RepositoryResult<BookingRecord> {
    check_amounts(update.total_amount, update.paid_amount, || {
        ErrorContext::new("update_booking")
            .with_entity("booking")
            .with_entity_id(id)
    })?;
    let updated = repo.update_booking(id, update).await?;
    info!("Updated booking {}", id);
    Ok(updated)
}

/// Remove a block, freeing its days.
pub async fn delete_booking<R: FullRepository + ?Sized>(
    repo: &R,
    id: &BookingId,
) -> RepositoryResult<()> {
    repo.delete_booking(id).await?;
    info!("Deleted booking {}", id);
    Ok(())
}

fn check_amounts(
    total: Option<i64>,
    paid: Option<i64>,
    context: impl Fn() -> ErrorContext,
) -> RepositoryResult<()> {
    for (name, value) in [("totalAmount", total), ("paidAmount", paid)] {
        if matches!(value, Some(v) if v < 0) {
            return Err(RepositoryError::validation_with_context(
                format!("{} cannot be negative", name),
                context(),
            ));
        }
    }
    Ok(())
}

// ==================== Pricing ====================

pub async fn get_pricing<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Option<PricingSettings>> {
    repo.get_pricing().await
}

/// Set the nightly price. The price must be positive.
pub async fn update_pricing<R: FullRepository + ?Sized>(
    repo: &R,
    nightly_price: i64,
    now: DateTime<Utc>,
) -> RepositoryResult<PricingSettings> {
    if nightly_price <= 0 {
        return Err(RepositoryError::validation_with_context(
            "Nightly price must be positive",
            ErrorContext::new("update_pricing")
                .with_entity("pricing")
                .with_details(format!("nightly_price={}", nightly_price)),
        ));
    }
    let pricing = PricingSettings {
        nightly_price,
        last_updated: now,
    };
    repo.set_pricing(&pricing).await?;
    info!("Nightly price set to {}", nightly_price);
    Ok(pricing)
}
