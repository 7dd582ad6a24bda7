//! Repository trait definitions for the booking store.
//!
//! The store is split into two focused traits:
//!
//! - [`booking`]: reservation and admin-block records
//! - [`settings`]: site settings such as the nightly price
//!
//! # Convenience Trait Bound
//!
//! For functions that need both, use the [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let bookings = repo.list_bookings().await?;
//!     let pricing = repo.get_pricing().await?;
//!     Ok(())
//! }
//! ```

pub mod booking;
pub mod error;
pub mod settings;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use booking::BookingRepository;
pub use settings::SettingsRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type implementing both store traits.
pub trait FullRepository: BookingRepository + SettingsRepository {}

impl<T> FullRepository for T where T: BookingRepository + SettingsRepository {}
