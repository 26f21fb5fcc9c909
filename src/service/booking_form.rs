//! Booking form controller: edits, validation and a single delivery call.
//!
//! State machine:
//!
//! ```text
//! Editing ──submit──▶ Submitting ──▶ Succeeded (terminal until close)
//!    ▲                    │
//!    └──── any edit ◀─── Failed
//! ```
//!
//! A rule violation moves straight to `Failed` without touching delivery.
//! `close()` blanks every field and returns to `Editing`.

use chrono::NaiveDate;

use super::delivery::{DeliveryError, DeliveryResult, DeliveryService};
use crate::domain::booking::{MIN_BUDGET, sanitize_phone};
use crate::domain::{BookingFields, BookingId, BookingValidationError, EventType, validate_booking};

/// Why a submission attempt ended in [`FormState::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// A booking rule was violated; delivery was not attempted.
    #[error(transparent)]
    Invalid(#[from] BookingValidationError),
    /// The notification channel refused the booking.
    #[error(transparent)]
    Rejected(#[from] DeliveryError),
}

/// Operations the controller refuses in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A submission is still in flight.
    #[error("a booking request is already being submitted")]
    Busy,
    /// The booking was confirmed; close the form to start over.
    #[error("this booking has already been confirmed")]
    AlreadyConfirmed,
}

/// Observable controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Fields may be edited and submitted.
    Editing,
    /// Waiting for the delivery channel.
    Submitting,
    /// Booking confirmed.
    Succeeded {
        /// Booking reference token.
        booking_id: BookingId,
        /// Address the confirmation goes to.
        confirmation_email: String,
        /// Delivery outcome.
        delivery: DeliveryResult,
    },
    /// Last attempt failed; the form stays editable.
    Failed {
        /// What went wrong.
        error: SubmissionError,
    },
}

impl FormState {
    /// Sentence to show the customer for a failed attempt.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Failed { error } => Some(error.to_string()),
            _ => None,
        }
    }
}

/// Drives one booking form from first keystroke to confirmation.
#[derive(Debug, Clone)]
pub struct BookingFormController {
    fields: BookingFields,
    event_type: Option<EventType>,
    initial_budget: u64,
    budget: u64,
    state: FormState,
}

impl BookingFormController {
    /// Opens a form for an optional event-type context and starting budget.
    ///
    /// The budget defaults to the booking minimum.
    #[must_use]
    pub fn new(event_type: Option<EventType>, budget: Option<u64>) -> Self {
        let initial_budget = budget.unwrap_or(MIN_BUDGET);
        Self {
            fields: BookingFields::default(),
            event_type,
            initial_budget,
            budget: initial_budget,
            state: FormState::Editing,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Current field values.
    #[must_use]
    pub const fn fields(&self) -> &BookingFields {
        &self.fields
    }

    /// Current budget in rupees.
    #[must_use]
    pub const fn budget(&self) -> u64 {
        self.budget
    }

    /// Sets the full name.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] while submitting or after confirmation.
    pub fn set_name(&mut self, name: &str) -> Result<(), FormError> {
        self.editable()?.name = name.to_string();
        Ok(())
    }

    /// Sets the email address.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] while submitting or after confirmation.
    pub fn set_email(&mut self, email: &str) -> Result<(), FormError> {
        self.editable()?.email = email.to_string();
        Ok(())
    }

    /// Sets the phone number, keeping only its first ten digits.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] while submitting or after confirmation.
    pub fn set_phone(&mut self, phone: &str) -> Result<(), FormError> {
        self.editable()?.phone = sanitize_phone(phone);
        Ok(())
    }

    /// Sets the event date (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] while submitting or after confirmation.
    pub fn set_event_date(&mut self, date: &str) -> Result<(), FormError> {
        self.editable()?.event_date = date.to_string();
        Ok(())
    }

    /// Sets the venue name.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] while submitting or after confirmation.
    pub fn set_venue(&mut self, venue: &str) -> Result<(), FormError> {
        self.editable()?.venue = venue.to_string();
        Ok(())
    }

    /// Sets the venue address.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] while submitting or after confirmation.
    pub fn set_address(&mut self, address: &str) -> Result<(), FormError> {
        self.editable()?.address = address.to_string();
        Ok(())
    }

    /// Sets the approximate guest count as typed.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] while submitting or after confirmation.
    pub fn set_guests(&mut self, guests: &str) -> Result<(), FormError> {
        self.editable()?.guests = guests.to_string();
        Ok(())
    }

    /// Sets the budget in rupees.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] while submitting or after confirmation.
    pub fn set_budget(&mut self, budget: u64) -> Result<(), FormError> {
        self.editable()?;
        self.budget = budget;
        Ok(())
    }

    /// Applies every field of `fields` through the setters.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] while submitting or after confirmation.
    pub fn fill(&mut self, fields: &BookingFields) -> Result<(), FormError> {
        self.set_name(&fields.name)?;
        self.set_email(&fields.email)?;
        self.set_phone(&fields.phone)?;
        self.set_event_date(&fields.event_date)?;
        self.set_venue(&fields.venue)?;
        self.set_address(&fields.address)?;
        self.set_guests(&fields.guests)
    }

    /// Validates the form and, if every rule passes, delivers the booking.
    ///
    /// `today` is the customer's local calendar date. The returned state is
    /// `Succeeded` or `Failed`; no retry is attempted either way.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if a submission is in flight or the booking was
    /// already confirmed.
    pub async fn submit(
        &mut self,
        delivery: &DeliveryService,
        today: NaiveDate,
    ) -> Result<&FormState, FormError> {
        self.ensure_submittable()?;

        let submission = match validate_booking(&self.fields, self.event_type, self.budget, today) {
            Ok(submission) => submission,
            Err(rule) => {
                tracing::debug!(rule = rule.kind(), "booking form rejected");
                self.state = FormState::Failed {
                    error: rule.into(),
                };
                return Ok(&self.state);
            }
        };

        self.state = FormState::Submitting;
        self.state = match delivery.deliver(&submission).await {
            Ok(result) => FormState::Succeeded {
                booking_id: submission.booking_id().clone(),
                confirmation_email: submission.customer_email().to_string(),
                delivery: result,
            },
            Err(err) => FormState::Failed { error: err.into() },
        };
        Ok(&self.state)
    }

    /// Dismisses the form: blanks every field and returns to `Editing`.
    pub fn close(&mut self) {
        self.fields = BookingFields::default();
        self.budget = self.initial_budget;
        self.state = FormState::Editing;
    }

    fn ensure_submittable(&self) -> Result<(), FormError> {
        match self.state {
            FormState::Submitting => Err(FormError::Busy),
            FormState::Succeeded { .. } => Err(FormError::AlreadyConfirmed),
            FormState::Editing | FormState::Failed { .. } => Ok(()),
        }
    }

    fn editable(&mut self) -> Result<&mut BookingFields, FormError> {
        self.ensure_submittable()?;
        if matches!(self.state, FormState::Failed { .. }) {
            self.state = FormState::Editing;
        }
        Ok(&mut self.fields)
    }
}
