use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{BookingId, BookingRecord, BookingUpdate};

/// Storage of booking records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so one instance can be shared by
/// every HTTP handler.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Full snapshot of every stored record, in no particular order.
    async fn list_bookings(&self) -> RepositoryResult<Vec<BookingRecord>>;

    /// Fetch one record.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no record has this id
    async fn get_booking(&self, id: &BookingId) -> RepositoryResult<BookingRecord>;

    /// Store a new record. The record's id must not already exist.
    async fn insert_booking(&self, record: BookingRecord) -> RepositoryResult<BookingRecord>;

    /// Apply a partial edit and return the updated record.
    async fn update_booking(
        &self,
        id: &BookingId,
        update: &BookingUpdate,
    ) -> RepositoryResult<BookingRecord>;

    /// Remove a record.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no record has this id
    async fn delete_booking(&self, id: &BookingId) -> RepositoryResult<()>;
}
