//! Booking request/response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{BookingFields, BookingId, EventType};
use crate::service::{BookingConfirmation, BookingRequest};

/// Guest count as typed: a number or free text such as `"80 approx"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum GuestsInput {
    /// Plain number.
    Count(u32),
    /// Free text; only its leading digits count.
    Text(String),
}

impl GuestsInput {
    fn into_text(self) -> String {
        match self {
            Self::Count(n) => n.to_string(),
            Self::Text(text) => text,
        }
    }
}

/// Request body for `POST /bookings`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Email address the confirmation goes to.
    #[serde(default)]
    pub email: String,
    /// Ten-digit Indian mobile number; separators are stripped.
    #[serde(default)]
    pub phone: String,
    /// Event date, `YYYY-MM-DD`.
    #[serde(default)]
    pub event_date: String,
    /// Venue name, if decided.
    #[serde(default)]
    pub venue: Option<String>,
    /// Venue address, if known.
    #[serde(default)]
    pub address: Option<String>,
    /// Approximate guest count.
    #[serde(default)]
    pub guests: Option<GuestsInput>,
    /// Event category; omitted means a general event.
    #[serde(default)]
    pub event_type: Option<EventType>,
    /// Budget in whole rupees.
    #[serde(default)]
    pub budget: Option<u64>,
    /// Saved draft being booked.
    #[serde(default)]
    pub saved_event_id: Option<Uuid>,
}

impl From<CreateBookingRequest> for BookingRequest {
    fn from(req: CreateBookingRequest) -> Self {
        Self {
            fields: BookingFields {
                name: req.name,
                email: req.email,
                phone: req.phone,
                event_date: req.event_date,
                venue: req.venue.unwrap_or_default(),
                address: req.address.unwrap_or_default(),
                guests: req.guests.map(GuestsInput::into_text).unwrap_or_default(),
            },
            event_type: req.event_type,
            budget: req.budget,
            saved_event_id: req.saved_event_id,
        }
    }
}

/// Response body for `POST /bookings` (201 Created).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingResponse {
    /// Always `true`.
    pub ok: bool,
    /// Booking reference token.
    #[schema(value_type = String, example = "BK-7Q2M9XK4L")]
    pub booking_id: BookingId,
    /// Channel (or simulated) reference id.
    pub reference_id: String,
    /// `true` when the notification channel was offline.
    pub simulated: bool,
    /// Address the confirmation was sent to.
    pub confirmation_email: String,
    /// Sentence to show the customer.
    pub message: String,
}

impl From<BookingConfirmation> for BookingResponse {
    fn from(c: BookingConfirmation) -> Self {
        let message = format!(
            "Booking Confirmed! A confirmation email has been sent to {}.",
            c.confirmation_email
        );
        Self {
            ok: c.delivery.ok,
            booking_id: c.booking_id,
            reference_id: c.delivery.reference_id,
            simulated: c.delivery.simulated,
            confirmation_email: c.confirmation_email,
            message,
        }
    }
}
