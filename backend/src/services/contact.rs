//! Outbound chat link for a booking enquiry.
//!
//! The site has no booking checkout; a completed selection becomes a
//! pre-filled WhatsApp message to the owner.

use chrono::Locale;
use serde::{Deserialize, Serialize};
use url::Url;

use super::availability::AvailabilityIndex;
use super::selection::{evaluate_selection, SelectionState};
use crate::models::{DateRange, Day};

const CHAT_BASE_URL: &str = "https://wa.me/";

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("No contact phone number configured")]
    MissingPhone,
    #[error("Invalid contact URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, thiserror::Error)]
pub enum BookingRequestError {
    #[error("Select both an arrival and a departure day")]
    Incomplete,
    #[error("Some days in {range} are not available")]
    Unavailable {
        range: DateRange,
        state: SelectionState,
    },
    #[error(transparent)]
    Contact(#[from] ContactError),
}

/// The composed enquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    pub url: String,
    pub message: String,
}

/// Spanish long date, e.g. "8 de junio".
pub fn long_date(day: Day) -> String {
    day.date()
        .format_localized("%-d de %B", Locale::es_AR)
        .to_string()
}

/// Enquiry text for a stay from `from` to `to`.
pub fn enquiry_message(from: Day, to: Day) -> String {
    format!(
        "Hola, vi el depto en la web. Me interesa reservar del {} al {}. ¿Está disponible?",
        long_date(from),
        long_date(to)
    )
}

/// Build the chat link for `phone`. Non-digit characters in the phone are dropped.
pub fn compose_link(phone: &str, from: Day, to: Day) -> Result<ContactLink, ContactError> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(ContactError::MissingPhone);
    }

    let message = enquiry_message(from, to);
    let base = Url::parse(CHAT_BASE_URL)?.join(&digits)?;
    let url = Url::parse_with_params(base.as_str(), &[("text", message.as_str())])?;

    Ok(ContactLink {
        url: url.into(),
        message,
    })
}

/// Validate `candidate` against `index` and compose the enquiry link.
///
/// The range must be complete and every day in it selectable.
pub fn request_booking(
    candidate: &DateRange,
    index: &AvailabilityIndex,
    phone: &str,
) -> Result<ContactLink, BookingRequestError> {
    if !candidate.is_complete() {
        return Err(BookingRequestError::Incomplete);
    }
    match evaluate_selection(candidate, index) {
        SelectionState::Complete { from, to } => Ok(compose_link(phone, from, to)?),
        state => Err(BookingRequestError::Unavailable {
            range: *candidate,
            state,
        }),
    }
}
