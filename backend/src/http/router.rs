//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing,
//! admin auth), and creates the axum router ready for serving.

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth;
use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - the calendar page may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = Router::new()
        .route(
            "/bookings",
            get(handlers::list_bookings).post(handlers::create_booking),
        )
        .route(
            "/bookings/{id}",
            patch(handlers::update_booking).delete(handlers::delete_booking),
        )
        .route("/pricing", put(handlers::update_pricing))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Availability
        .route("/availability", get(handlers::get_month))
        .route("/availability/blocked", get(handlers::get_blocked))
        .route("/availability/stream", get(handlers::stream_availability))
        // Selection
        .route("/selection/evaluate", post(handlers::evaluate))
        .route("/selection/click", post(handlers::click))
        .route("/booking-requests", post(handlers::create_booking_request))
        .route("/pricing", get(handlers::get_pricing))
        .nest("/admin", admin);

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
