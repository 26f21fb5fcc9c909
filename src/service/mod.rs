//! Service layer: business logic orchestration.
//!
//! [`BookingService`] runs a [`BookingFormController`] per request and
//! hands validated bookings to the [`DeliveryService`]. [`ChatService`]
//! owns the Aura+ chat sessions.

pub mod booking_form;
pub mod booking_service;
pub mod chat;
pub mod delivery;

pub use booking_form::{BookingFormController, FormError, FormState, SubmissionError};
pub use booking_service::{BookingConfirmation, BookingRequest, BookingService};
pub use chat::{ChatMode, ChatService, ChatSession};
pub use delivery::{DeliveryChannel, DeliveryError, DeliveryResult, DeliveryService};
