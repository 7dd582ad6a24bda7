//! Booking records as they live in the store.
//!
//! Records come from a document store that was written by more than one
//! client over time, so date fields may be a structured timestamp or a
//! string, and amounts may be numbers or numeric strings. Everything is
//! normalized here, at the ingestion boundary.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::date_range::BookedInterval;
use super::day::Day;

/// Placeholder stored when an admin blocks dates without naming a client.
pub const UNNAMED_CLIENT: &str = "Sin nombre";

/// Opaque booking identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub String);

impl BookingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored date in one of the shapes the store has been seen to hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordDate {
    /// Seconds/nanoseconds since the Unix epoch.
    Timestamp {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// RFC 3339 datetime, naive `YYYY-MM-DDTHH:MM:SS` or plain `YYYY-MM-DD`.
    Text(String),
}

impl RecordDate {
    /// Normalize to a calendar day as seen from `offset`, dropping time-of-day.
    ///
    /// Returns `None` for out-of-range timestamps and unparseable strings.
    pub fn to_day(&self, offset: &FixedOffset) -> Option<Day> {
        match self {
            RecordDate::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds)
                .map(|dt| Day::new(dt.with_timezone(offset).date_naive())),
            RecordDate::Text(text) => parse_text_day(text.trim(), offset),
        }
    }
}

fn parse_text_day(text: &str, offset: &FixedOffset) -> Option<Day> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(Day::new(dt.with_timezone(offset).date_naive()));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Day::new(naive.date()));
    }
    text.parse::<Day>().ok()
}

impl From<Day> for RecordDate {
    fn from(day: Day) -> Self {
        RecordDate::Text(day.to_string())
    }
}

impl From<DateTime<Utc>> for RecordDate {
    fn from(dt: DateTime<Utc>) -> Self {
        RecordDate::Timestamp {
            seconds: dt.timestamp(),
            nanoseconds: dt.timestamp_subsec_nanos(),
        }
    }
}

/// Who created a booking record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    /// Dates blocked from the admin panel.
    #[default]
    Admin,
    /// A guest reservation imported from elsewhere.
    Guest,
}

/// A persisted reservation or admin block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: BookingId,
    #[serde(default)]
    pub start_date: Option<RecordDate>,
    #[serde(default)]
    pub end_date: Option<RecordDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "type")]
    pub kind: BookingKind,
    #[serde(default)]
    pub client_name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_amount: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub paid_amount: i64,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub is_paid: bool,
}

impl BookingRecord {
    /// Admin block over `interval` carrying the given client/payment details.
    pub fn new_block(
        id: BookingId,
        interval: BookedInterval,
        details: BookingDetails,
        created_at: DateTime<Utc>,
    ) -> Self {
        let client_name = details
            .client_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNNAMED_CLIENT.to_string());
        Self {
            id,
            start_date: Some(interval.from.into()),
            end_date: Some(interval.to.into()),
            created_at: Some(created_at),
            kind: BookingKind::Admin,
            client_name,
            total_amount: details.total_amount.unwrap_or(0),
            paid_amount: details.paid_amount.unwrap_or(0),
            note: details.note.unwrap_or_default(),
            is_paid: details.is_paid,
        }
    }

    /// The blocked span of this record, `None` when either end is missing or unreadable.
    pub fn interval(&self, offset: &FixedOffset) -> Option<BookedInterval> {
        let start = self.start_date.as_ref()?.to_day(offset)?;
        let end = self.end_date.as_ref()?.to_day(offset)?;
        Some(BookedInterval::new(start, end))
    }

    /// Amount still owed. Negative when the client overpaid.
    pub fn outstanding(&self) -> i64 {
        self.total_amount - self.paid_amount
    }

    /// Apply an admin edit of the client/payment fields.
    pub fn apply(&mut self, update: &BookingUpdate) {
        if let Some(ref name) = update.client_name {
            self.client_name = name.clone();
        }
        if let Some(total) = update.total_amount {
            self.total_amount = total;
        }
        if let Some(paid) = update.paid_amount {
            self.paid_amount = paid;
        }
        if let Some(ref note) = update.note {
            self.note = note.clone();
        }
        if let Some(is_paid) = update.is_paid {
            self.is_paid = is_paid;
        }
    }
}

/// Client/payment details captured when blocking dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub total_amount: Option<i64>,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub paid_amount: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
}

/// Partial edit of a stored booking; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub total_amount: Option<i64>,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub paid_amount: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub is_paid: Option<bool>,
}

/// Nightly price shown to visitors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSettings {
    #[serde(alias = "dailyPrice", deserialize_with = "lenient_price")]
    pub nightly_price: i64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

impl AmountRepr {
    fn into_amount<E: serde::de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            AmountRepr::Int(v) => Ok(Some(v)),
            AmountRepr::Float(v) => round_amount(v).map(Some),
            AmountRepr::Text(s) => {
                // Numeric form inputs store their raw value, "." being the decimal point.
                let text = s.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse::<f64>()
                    .map_err(|_| E::custom(format!("invalid amount: {:?}", s)))
                    .and_then(round_amount)
                    .map(Some)
            }
        }
    }
}

fn round_amount<E: serde::de::Error>(v: f64) -> Result<i64, E> {
    if v.is_finite() {
        Ok(v.round() as i64)
    } else {
        Err(E::custom(format!("amount is not finite: {}", v)))
    }
}

/// Price text typed with "." as thousands separator ("75.000").
fn parse_price_text(text: &str) -> Option<i64> {
    let text = text.trim();
    let mut groups = text.split('.');
    let head = groups.next()?;
    if head.is_empty() || (text.contains('.') && head.len() > 3) {
        return None;
    }
    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Int(i64),
    Text(String),
}

/// Deserialize a nightly price given as a number or as thousands-separated text.
pub fn lenient_price<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match PriceRepr::deserialize(deserializer)? {
        PriceRepr::Int(v) => Ok(v),
        PriceRepr::Text(s) => parse_price_text(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid price: {:?}", s))),
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(AmountRepr::deserialize(deserializer)?
        .into_amount()?
        .unwrap_or(0))
}

fn lenient_optional_amount<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AmountRepr>::deserialize(deserializer)? {
        Some(repr) => repr.into_amount(),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "booking_tests.rs"]
mod booking_tests;
