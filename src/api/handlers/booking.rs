//! Booking submission handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Local;

use crate::api::dto::{BookingResponse, CreateBookingRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /bookings` — Validate and submit a booking request.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] for the first violated rule and
/// [`GatewayError::Delivery`] when the notification channel refused.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    summary = "Submit a booking request",
    description = "Validates the booking form (email, phone, date window, minimum budget, name) and sends the booking notification. When the notification channel is unreachable the booking is still confirmed with `simulated: true`.",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking confirmed", body = BookingResponse),
        (status = 404, description = "Saved event not found", body = ErrorResponse),
        (status = 422, description = "A booking rule was violated", body = ErrorResponse),
        (status = 502, description = "Notification channel rejected the booking", body = ErrorResponse),
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let today = Local::now().date_naive();
    let confirmation = state
        .booking_service
        .submit_booking(req.into(), today)
        .await?;
    Ok((StatusCode::CREATED, Json(BookingResponse::from(confirmation))))
}

/// Booking routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings", post(create_booking))
}
