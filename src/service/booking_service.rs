//! Booking service: runs one booking form per HTTP request.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use super::booking_form::{BookingFormController, FormError, FormState, SubmissionError};
use super::delivery::{DeliveryResult, DeliveryService};
use crate::domain::{BookingFields, BookingId, EventType, SavedEventStore};
use crate::error::GatewayError;

/// Everything a client sends to book an event.
#[derive(Debug, Clone, Default)]
pub struct BookingRequest {
    /// Raw form fields.
    pub fields: BookingFields,
    /// Event category; falls back to the saved event's, then to general.
    pub event_type: Option<EventType>,
    /// Budget in rupees; falls back to the saved event's.
    pub budget: Option<u64>,
    /// Saved draft this booking comes from, if any.
    pub saved_event_id: Option<Uuid>,
}

/// A confirmed booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    /// Booking reference token.
    pub booking_id: BookingId,
    /// Address the confirmation was sent to.
    pub confirmation_email: String,
    /// Delivery outcome.
    pub delivery: DeliveryResult,
}

/// Validates and delivers bookings, keeping saved drafts in sync.
#[derive(Debug, Clone)]
pub struct BookingService {
    delivery: Arc<DeliveryService>,
    saved_events: Arc<SavedEventStore>,
}

impl BookingService {
    /// Creates a new `BookingService`.
    #[must_use]
    pub fn new(delivery: Arc<DeliveryService>, saved_events: Arc<SavedEventStore>) -> Self {
        Self {
            delivery,
            saved_events,
        }
    }

    /// Name of the configured delivery channel.
    #[must_use]
    pub fn channel_name(&self) -> &'static str {
        self.delivery.channel_name()
    }

    /// Returns the saved event store.
    #[must_use]
    pub fn saved_events(&self) -> &Arc<SavedEventStore> {
        &self.saved_events
    }

    /// Submits a booking made on `today` (the customer's calendar date).
    ///
    /// The form runs on its own task, so a client that disconnects does not
    /// abort a delivery already under way.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::SavedEventNotFound`] for an unknown draft id.
    /// - [`GatewayError::Validation`] for the first violated booking rule.
    /// - [`GatewayError::Delivery`] when the channel rejected the booking.
    /// - [`GatewayError::Internal`] if the submission task dies.
    pub async fn submit_booking(
        &self,
        request: BookingRequest,
        today: NaiveDate,
    ) -> Result<BookingConfirmation, GatewayError> {
        let (event_type, budget) = match request.saved_event_id {
            Some(id) => {
                let draft = self.saved_events.get(id).await?;
                (
                    request.event_type.or(Some(draft.event_type)),
                    request.budget.or(Some(draft.budget)),
                )
            }
            None => (request.event_type, request.budget),
        };

        let delivery = Arc::clone(&self.delivery);
        let fields = request.fields;
        let task = tokio::spawn(async move {
            let mut form = BookingFormController::new(event_type, budget);
            form.fill(&fields)?;
            let state = form.submit(&delivery, today).await?.clone();
            Ok::<_, FormError>(state)
        });

        let state = task
            .await
            .map_err(|e| GatewayError::Internal(format!("booking task failed: {e}")))?
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        match state {
            FormState::Succeeded {
                booking_id,
                confirmation_email,
                delivery,
            } => {
                if let Some(id) = request.saved_event_id
                    && let Err(err) = self.saved_events.mark_booked(id).await
                {
                    tracing::warn!(%booking_id, event_id = %id, error = %err, "could not mark saved event booked");
                }
                tracing::info!(
                    %booking_id,
                    simulated = delivery.simulated,
                    reference_id = %delivery.reference_id,
                    "booking confirmed"
                );
                Ok(BookingConfirmation {
                    booking_id,
                    confirmation_email,
                    delivery,
                })
            }
            FormState::Failed {
                error: SubmissionError::Invalid(rule),
            } => Err(rule.into()),
            FormState::Failed {
                error: SubmissionError::Rejected(err),
            } => Err(err.into()),
            FormState::Editing | FormState::Submitting => Err(GatewayError::Internal(
                "booking form did not settle".to_string(),
            )),
        }
    }
}
