//! In-memory local repository implementation.
//!
//! Stores every record in a `HashMap` behind a lock. Used by the server's
//! default configuration, by tests, and for local development with an
//! optional JSON seed file.

use async_trait::async_trait;
use log::info;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{BookingId, BookingRecord, BookingUpdate, PricingSettings};

/// In-memory local repository.
///
/// Cloning shares the underlying data.
///
/// # Example
/// ```
/// use stay_rust::db::repositories::LocalRepository;
/// use stay_rust::db::repository::BookingRepository;
///
/// let repo = LocalRepository::new();
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// assert!(rt.block_on(repo.list_bookings()).unwrap().is_empty());
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    bookings: HashMap<BookingId, BookingRecord>,
    pricing: Option<PricingSettings>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            bookings: HashMap::new(),
            pricing: None,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Load records into the repository, replacing any with the same id.
    pub fn seed(&self, records: Vec<BookingRecord>) {
        let mut data = self.data.write();
        for record in records {
            data.bookings.insert(record.id.clone(), record);
        }
    }

    /// Repository pre-filled from a JSON array of booking records.
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
        })?;
        let records: Vec<BookingRecord> = serde_json::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to parse seed file {}: {}",
                path.display(),
                e
            ))
        })?;

        info!("Seeding local repository with {} bookings", records.len());
        let repo = Self::new();
        repo.seed(records);
        Ok(repo)
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    pub fn clear(&self) {
        let mut data = self.data.write();
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
    }

    pub fn booking_count(&self) -> usize {
        self.data.read().bookings.len()
    }

    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Store is not healthy").with_operation(operation));
        }
        Ok(())
    }

    fn missing(operation: &str, id: &BookingId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Booking {} not found", id),
            ErrorContext::new(operation)
                .with_entity("booking")
                .with_entity_id(id),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_bookings(&self) -> RepositoryResult<Vec<BookingRecord>> {
        self.check_health("list_bookings")?;
        Ok(self.data.read().bookings.values().cloned().collect())
    }

    async fn get_booking(&self, id: &BookingId) -> RepositoryResult<BookingRecord> {
        self.check_health("get_booking")?;
        self.data
            .read()
            .bookings
            .get(id)
            .cloned()
            .ok_or_else(|| Self::missing("get_booking", id))
    }

    async fn insert_booking(&self, record: BookingRecord) -> RepositoryResult<BookingRecord> {
        self.check_health("insert_booking")?;
        let mut data = self.data.write();
        if data.bookings.contains_key(&record.id) {
            return Err(RepositoryError::conflict_with_context(
                format!("Booking {} already exists", record.id),
                ErrorContext::new("insert_booking")
                    .with_entity("booking")
                    .with_entity_id(&record.id),
            ));
        }
        data.bookings.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update_booking(
        &self,
        id: &BookingId,
        update: &BookingUpdate,
    ) -> RepositoryResult<BookingRecord> {
        self.check_health("update_booking")?;
        let mut data = self.data.write();
        let record = data
            .bookings
            .get_mut(id)
            .ok_or_else(|| Self::missing("update_booking", id))?;
        record.apply(update);
        Ok(record.clone())
    }

    async fn delete_booking(&self, id: &BookingId) -> RepositoryResult<()> {
        self.check_health("delete_booking")?;
        match self.data.write().bookings.remove(id) {
            Some(_) => Ok(()),
            None => Err(Self::missing("delete_booking", id)),
        }
    }
}

#[async_trait]
impl SettingsRepository for LocalRepository {
    async fn get_pricing(&self) -> RepositoryResult<Option<PricingSettings>> {
        self.check_health("get_pricing")?;
        Ok(self.data.read().pricing.clone())
    }

    async fn set_pricing(&self, pricing: &PricingSettings) -> RepositoryResult<()> {
        self.check_health("set_pricing")?;
        self.data.write().pricing = Some(pricing.clone());
        Ok(())
    }
}
