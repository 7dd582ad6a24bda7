//! Booking store.
//!
//! This module provides abstractions for storage operations via the Repository
//! pattern, so the HTTP layer never depends on a concrete backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, availability feed)        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Admin rules              │
//! │  - Range validation before blocking                     │
//! │  - Amount and price checks                              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │       (in-memory, optional JSON seed)         │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```
//! use stay_rust::config::RepositorySettings;
//! use stay_rust::db::{services, RepositoryFactory};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let repo = RepositoryFactory::from_settings(&RepositorySettings::default()).unwrap();
//! assert!(services::health_check(repo.as_ref()).await.unwrap());
//! # });
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;


// ==================== Service Layer ====================

pub use services::{
    block_dates, delete_booking, get_booking, get_pricing, health_check, list_bookings,
    update_booking, update_pricing,
};

// ==================== Repository Pattern Exports ====================

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{
    BookingRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    SettingsRepository,
};
