//! Restaurant booking service
//!
//! A small REST resource whose failures exercise every branch of the problem
//! mapping: unknown ids, rejected input and a domain-specific business error.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod store;
mod types;

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use faultline_config::{BOOKING_ROUTE_PREFIX, BookingConfig};
use faultline_problem::{ProblemError, invalid_argument};

pub use error::{BookingError, KINDS, OVER_BOOKED, Result};
pub use store::{BookingManagement, InMemoryBookings};
pub use types::{Booking, BookingTo, NewBooking};

/// Shared state of the booking routes
#[derive(Clone)]
pub struct BookingState {
    bookings: Arc<dyn BookingManagement>,
    max_seats: u32,
}

impl BookingState {
    pub fn new(bookings: Arc<dyn BookingManagement>, max_seats: u32) -> Self {
        Self { bookings, max_seats }
    }

    /// In-memory store sized from configuration
    pub fn from_config(config: &BookingConfig) -> Self {
        Self::new(Arc::new(InMemoryBookings::new(config.tables)), config.max_seats)
    }
}

/// Routes for `/booking`
pub fn booking_router(state: BookingState) -> Router {
    Router::new()
        .route(BOOKING_ROUTE_PREFIX, post(create_booking))
        .route(&format!("{BOOKING_ROUTE_PREFIX}/{{id}}"), get(get_booking))
        .with_state(state)
}

async fn create_booking(
    State(state): State<BookingState>,
    body: std::result::Result<Json<BookingTo>, JsonRejection>,
) -> std::result::Result<(StatusCode, Json<BookingTo>), ProblemError> {
    let Json(request) = body.map_err(invalid_argument)?;
    let booking = request.validate(state.max_seats)?;
    let created = state.bookings.create_booking(booking).await?;

    Ok((StatusCode::ACCEPTED, Json(created.into())))
}

async fn get_booking(
    State(state): State<BookingState>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> std::result::Result<Json<BookingTo>, ProblemError> {
    let Path(id) = id.map_err(invalid_argument)?;
    let booking = state.bookings.get_booking(id).await?;

    Ok(Json(booking.into()))
}
