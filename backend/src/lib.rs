//! # Stay Rust Backend
//!
//! Availability and range-selection engine for a single vacation rental.
//!
//! Visitors pick arrival and departure days on a calendar; the backend
//! decides which days can be selected, validates the chosen range against
//! existing bookings, and turns an accepted range into a pre-filled WhatsApp
//! enquiry. The owner blocks dates, keeps client/payment notes and sets the
//! nightly price through admin endpoints.
//!
//! ## Architecture
//!
//! - [`models`]: `Day`, `DateRange`, `BookedInterval` and stored booking records
//! - [`services`]: availability index, range validator, calendar view,
//!   availability feed, contact link
//! - [`db`]: repository traits, in-memory store, admin operations
//! - [`config`]: `stay.toml` and environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
