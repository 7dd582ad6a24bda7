//! Live availability snapshots.
//!
//! The feed owns the latest [`AvailabilityIndex`] and replaces it whole
//! whenever the booking store changes. Readers always see one complete
//! snapshot; subscribers are woken on every replacement.

use log::{info, warn};
use std::sync::Arc;
use tokio::sync::watch;

use super::availability::{AvailabilityIndex, Clock, IndexBuilder};
use crate::db::repository::{BookingRepository, RepositoryResult};
use crate::models::BookingRecord;

/// One published version of the index.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Increases by one with every replacement. The initial empty index is 0.
    pub version: u64,
    pub index: AvailabilityIndex,
}

/// Holder of the current availability snapshot.
pub struct AvailabilityFeed {
    builder: IndexBuilder,
    clock: Arc<dyn Clock>,
    tx: watch::Sender<Arc<Snapshot>>,
}

impl AvailabilityFeed {
    /// Feed starting from an empty index.
    pub fn new(builder: IndexBuilder, clock: Arc<dyn Clock>) -> Self {
        let initial = Snapshot {
            version: 0,
            index: AvailabilityIndex::empty(clock.today()),
        };
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { builder, clock, tx }
    }

    /// Latest index, re-dated to the clock's current day.
    pub fn current(&self) -> AvailabilityIndex {
        let snapshot = self.tx.borrow().clone();
        snapshot.index.with_today(self.clock.today())
    }

    /// Latest published snapshot as stored.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.tx.subscribe()
    }

    pub fn today(&self) -> crate::models::Day {
        self.clock.today()
    }

    pub fn builder(&self) -> &IndexBuilder {
        &self.builder
    }

    /// UTC offset used to read record dates.
    pub fn offset(&self) -> chrono::FixedOffset {
        self.builder.offset()
    }

    /// Replace the index with one built from `records`.
    pub fn publish(&self, records: &[BookingRecord]) -> Arc<Snapshot> {
        let index = self.builder.build(records, self.clock.today());
        let version = self.tx.borrow().version + 1;
        let snapshot = Arc::new(Snapshot { version, index });
        self.tx.send_replace(Arc::clone(&snapshot));
        info!(
            "Availability snapshot v{} published ({} blocked intervals)",
            version,
            snapshot.index.blocked_intervals().len()
        );
        snapshot
    }

    /// Reload every booking from `repo` and publish the result.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn refresh<R>(&self, repo: &R) -> RepositoryResult<Arc<Snapshot>>
    where
        R: BookingRepository + ?Sized,
    {
        match repo.list_bookings().await {
            Ok(records) => Ok(self.publish(&records)),
            Err(e) => {
                warn!("Availability refresh failed, keeping previous snapshot: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::models::{BookedInterval, BookingDetails, BookingId, Day};
    use crate::services::availability::{is_day_selectable, FixedClock};

    fn d(s: &str) -> Day {
        s.parse().unwrap()
    }

    fn july_block() -> BookingRecord {
        BookingRecord::new_block(
            BookingId::new("july"),
            BookedInterval::new(d("2024-07-01"), d("2024-07-03")),
            BookingDetails::default(),
            chrono::Utc::now(),
        )
    }

    fn feed() -> AvailabilityFeed {
        AvailabilityFeed::new(
            IndexBuilder::default(),
            Arc::new(FixedClock(d("2024-06-01"))),
        )
    }

    #[tokio::test]
    async fn test_refresh_replaces_whole_index() {
        let feed = feed();
        let repo = LocalRepository::new();
        assert!(is_day_selectable(d("2024-07-02"), &feed.current()));

        repo.seed(vec![july_block()]);
        let snapshot = feed.refresh(&repo).await.unwrap();

        assert_eq!(snapshot.version, 1);
        assert_eq!(
            snapshot.index.blocked_intervals(),
            &[BookedInterval::new(d("2024-07-01"), d("2024-07-03"))]
        );
        assert!(!is_day_selectable(d("2024-07-02"), &feed.current()));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let feed = feed();
        let repo = LocalRepository::new();
        repo.seed(vec![july_block()]);
        feed.refresh(&repo).await.unwrap();

        repo.set_healthy(false);
        assert!(feed.refresh(&repo).await.is_err());
        assert_eq!(feed.snapshot().version, 1);
        assert!(!is_day_selectable(d("2024-07-02"), &feed.current()));
    }

    #[tokio::test]
    async fn test_subscribers_see_new_snapshot() {
        let feed = feed();
        let mut rx = feed.subscribe();
        feed.publish(&[]);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().version, 1);
    }
}
