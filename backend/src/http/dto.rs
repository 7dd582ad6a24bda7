//! Data Transfer Objects for the HTTP API.
//!
//! Request and response bodies use camelCase keys, the same as stored
//! booking records. Value types that already serialize (`DateRange`,
//! `SelectionState`, `MonthView`) are sent as they are.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::models::{self, BookedInterval, BookingDetails, BookingRecord, Day};
use crate::services::{AvailabilityIndex, SelectionState};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
    /// Version of the availability snapshot being served
    pub snapshot_version: u64,
}

/// Query parameters for the month view. Both default to the current month.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthQuery {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
}

/// Blocked intervals of one snapshot; also the payload of SSE `snapshot` events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedResponse {
    pub version: u64,
    pub today: Day,
    pub blocked: Vec<BookedInterval>,
}

impl BlockedResponse {
    pub fn new(version: u64, index: &AvailabilityIndex) -> Self {
        Self {
            version,
            today: index.today(),
            blocked: index.blocked_intervals().to_vec(),
        }
    }
}

/// A click on the calendar, carrying the selection it applies to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickRequest {
    #[serde(default)]
    pub selection: SelectionState,
    pub day: Day,
}

/// The outbound enquiry for a validated range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequestResponse {
    pub from: Day,
    pub to: Day,
    pub url: String,
    pub message: String,
}

/// Admin request to block a range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRequest {
    pub from: Day,
    pub to: Day,
    #[serde(default)]
    pub details: BookingDetails,
}

/// A stored booking with its normalized days and outstanding balance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    #[serde(flatten)]
    pub record: BookingRecord,
    /// First blocked day, `None` when the record has no readable interval
    pub from: Option<Day>,
    pub to: Option<Day>,
    pub outstanding: i64,
}

impl BookingDto {
    pub fn new(record: BookingRecord, offset: &FixedOffset) -> Self {
        let interval = record.interval(offset);
        Self {
            from: interval.map(|i| i.from),
            to: interval.map(|i| i.to),
            outstanding: record.outstanding(),
            record,
        }
    }
}

/// Booking list response.
#[derive(Debug, Clone, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingDto>,
    pub total: usize,
}

/// Admin request to set the nightly price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    #[serde(alias = "dailyPrice", deserialize_with = "models::lenient_price")]
    pub nightly_price: i64,
}
