//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use chrono::Utc;
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{
    BlockRequest, BlockedResponse, BookingDto, BookingListResponse, BookingRequestResponse,
    ClickRequest, HealthResponse, MonthQuery, PricingRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{BookingId, BookingUpdate, DateRange, PricingSettings};
use crate::services::{
    evaluate_selection, month_view, request_booking, BookingRequestError, ContactError,
    MonthView, SelectionState,
};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
        snapshot_version: state.feed.snapshot().version,
    }))
}

// =============================================================================
// Availability
// =============================================================================

/// GET /v1/availability?year=&month=
///
/// Day statuses for one month of the calendar.
pub async fn get_month(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> HandlerResult<MonthView> {
    let index = state.feed.current();
    let year = query.year.unwrap_or_else(|| index.today().year());
    let month = query.month.unwrap_or_else(|| index.today().month());

    month_view(year, month, &index)
        .map(Json)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid month {}-{}", year, month)))
}

/// GET /v1/availability/blocked
pub async fn get_blocked(State(state): State<AppState>) -> HandlerResult<BlockedResponse> {
    let version = state.feed.snapshot().version;
    Ok(Json(BlockedResponse::new(version, &state.feed.current())))
}

/// GET /v1/availability/stream
///
/// Stream availability snapshots via Server-Sent Events (SSE). The current
/// snapshot is sent first, then one `snapshot` event per replacement.
pub async fn stream_availability(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let feed = state.feed.clone();
    let mut rx = feed.subscribe();

    let stream = async_stream::stream! {
        loop {
            let snapshot = rx.borrow_and_update().clone();
            let index = snapshot.index.with_today(feed.today());
            let payload = BlockedResponse::new(snapshot.version, &index);
            yield Ok(Event::default()
                .event("snapshot")
                .data(serde_json::to_string(&payload).unwrap_or_default()));

            if rx.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

// =============================================================================
// Selection
// =============================================================================

/// POST /v1/selection/evaluate
///
/// Validate a candidate range against the current availability.
pub async fn evaluate(
    State(state): State<AppState>,
    Json(candidate): Json<DateRange>,
) -> HandlerResult<SelectionState> {
    Ok(Json(evaluate_selection(&candidate, &state.feed.current())))
}

/// POST /v1/selection/click
///
/// Apply one calendar click to the given selection.
pub async fn click(
    State(state): State<AppState>,
    Json(request): Json<ClickRequest>,
) -> HandlerResult<SelectionState> {
    Ok(Json(
        request.selection.click(request.day, &state.feed.current()),
    ))
}

/// POST /v1/booking-requests
///
/// Validate a complete range and return the WhatsApp enquiry link.
pub async fn create_booking_request(
    State(state): State<AppState>,
    Json(candidate): Json<DateRange>,
) -> HandlerResult<BookingRequestResponse> {
    let phone = state
        .config
        .site
        .contact_phone
        .as_deref()
        .ok_or(BookingRequestError::Contact(ContactError::MissingPhone))?;

    let link = request_booking(&candidate, &state.feed.current(), phone)?;
    let from = candidate.from();
    let to = candidate.to().unwrap_or(from);

    tracing::info!("Booking request composed for {}..={}", from, to);
    Ok(Json(BookingRequestResponse {
        from,
        to,
        url: link.url,
        message: link.message,
    }))
}

// =============================================================================
// Pricing
// =============================================================================

/// GET /v1/pricing
pub async fn get_pricing(State(state): State<AppState>) -> HandlerResult<PricingSettings> {
    db_services::get_pricing(state.repository.as_ref())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No nightly price has been set".to_string()))
}

/// PUT /v1/admin/pricing
pub async fn update_pricing(
    State(state): State<AppState>,
    Json(request): Json<PricingRequest>,
) -> HandlerResult<PricingSettings> {
    let pricing =
        db_services::update_pricing(state.repository.as_ref(), request.nightly_price, Utc::now())
            .await?;
    Ok(Json(pricing))
}

// =============================================================================
// Admin Bookings
// =============================================================================

/// GET /v1/admin/bookings
///
/// All bookings, latest start first.
pub async fn list_bookings(State(state): State<AppState>) -> HandlerResult<BookingListResponse> {
    let offset = state.feed.offset();
    let bookings: Vec<BookingDto> =
        db_services::list_bookings(state.repository.as_ref(), &offset)
            .await?
            .into_iter()
            .map(|record| BookingDto::new(record, &offset))
            .collect();
    let total = bookings.len();

    Ok(Json(BookingListResponse { bookings, total }))
}

/// POST /v1/admin/bookings
///
/// Block a range. The range is validated against the stored bookings.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<BlockRequest>,
) -> Result<(StatusCode, Json<BookingDto>), AppError> {
    let range = DateRange::new(request.from, request.to);
    let record = db_services::block_dates(
        state.repository.as_ref(),
        state.feed.builder(),
        state.feed.today(),
        &range,
        request.details,
        Utc::now(),
    )
    .await?;
    refresh_feed(&state).await;

    Ok((
        StatusCode::CREATED,
        Json(BookingDto::new(record, &state.feed.offset())),
    ))
}

/// PATCH /v1/admin/bookings/{id}
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<BookingUpdate>,
) -> HandlerResult<BookingDto> {
    let record =
        db_services::update_booking(state.repository.as_ref(), &BookingId::new(id), &update)
            .await?;
    Ok(Json(BookingDto::new(record, &state.feed.offset())))
}

/// DELETE /v1/admin/bookings/{id}
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    db_services::delete_booking(state.repository.as_ref(), &BookingId::new(id)).await?;
    refresh_feed(&state).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Republish availability after a store change. A failure keeps the old snapshot.
async fn refresh_feed(state: &AppState) {
    let _ = state.feed.refresh(state.repository.as_ref()).await;
}
