//! Domain layer: booking rules, event catalog, estimator and transcripts.
//!
//! Everything here is synchronous and I/O free except the in-memory
//! [`SavedEventStore`], which only takes async locks.

pub mod booking;
pub mod booking_id;
pub mod budget;
pub mod chat_message;
pub mod currency;
pub mod event_type;
pub mod saved_event;

pub use booking::{BookingFields, BookingSubmission, BookingValidationError, validate_booking};
pub use booking_id::BookingId;
pub use chat_message::{ChatMessage, ChatRole};
pub use event_type::EventType;
pub use saved_event::{SavedEvent, SavedEventStatus, SavedEventStore};
