//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::repository::FullRepository;
use crate::services::{AvailabilityFeed, Clock, IndexBuilder, SystemClock};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for booking and settings storage
    pub repository: Arc<dyn FullRepository>,
    /// Latest availability snapshot
    pub feed: Arc<AvailabilityFeed>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn FullRepository>,
        feed: Arc<AvailabilityFeed>,
        config: AppConfig,
    ) -> Self {
        Self {
            repository,
            feed,
            config: Arc::new(config),
        }
    }

    /// State with a feed reading record dates and "today" in the site's offset.
    pub fn from_config(repository: Arc<dyn FullRepository>, config: AppConfig) -> Self {
        let offset = config.site.utc_offset;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(offset));
        let feed = AvailabilityFeed::new(IndexBuilder::new(offset), clock);
        Self::new(repository, Arc::new(feed), config)
    }
}
